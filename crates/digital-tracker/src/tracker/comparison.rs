use super::analytics::TierCounts;
use super::domain::{metric_keys_of, Country, MetricKey, ScoreTier};
use super::scoring::scores_equal;
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

pub const MIN_COMPARISON_COUNTRIES: usize = 2;
pub const MAX_COMPARISON_COUNTRIES: usize = 4;

const NEED_MORE_COUNTRIES: &str = "Select at least two countries to see comparison insights.";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ComparisonError {
    #[error("at most {max} countries can be compared, {requested} were requested")]
    TooManyCountries { requested: usize, max: usize },
}

/// Splits a `countries=EST,SGP` style parameter into upper-cased ids,
/// dropping blanks and repeated ids.
pub fn parse_country_ids(param: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    param
        .split(',')
        .map(|id| id.trim().to_ascii_uppercase())
        .filter(|id| !id.is_empty())
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

pub fn build_compare_path(ids: &[String]) -> String {
    if ids.is_empty() {
        "/compare".to_string()
    } else {
        format!("/compare?countries={}", ids.join(","))
    }
}

/// Countries picked for a comparison, in the order they were requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSelection {
    pub countries: Vec<Country>,
    pub unknown_ids: Vec<String>,
}

impl ComparisonSelection {
    pub fn resolve(countries: &[Country], ids: &[String]) -> Result<Self, ComparisonError> {
        if ids.len() > MAX_COMPARISON_COUNTRIES {
            return Err(ComparisonError::TooManyCountries {
                requested: ids.len(),
                max: MAX_COMPARISON_COUNTRIES,
            });
        }

        let mut selected = Vec::new();
        let mut unknown_ids = Vec::new();
        for id in ids {
            match countries
                .iter()
                .find(|country| country.id.eq_ignore_ascii_case(id))
            {
                Some(country) => selected.push(country.clone()),
                None => unknown_ids.push(id.clone()),
            }
        }

        Ok(Self {
            countries: selected,
            unknown_ids,
        })
    }
}

/// Metrics on which every selected country is in the strong tier. Empty for
/// fewer than two countries.
pub fn shared_high_metrics(countries: &[Country]) -> Vec<MetricKey> {
    if countries.len() < MIN_COMPARISON_COUNTRIES {
        return Vec::new();
    }

    metric_keys_of(countries)
        .into_iter()
        .filter(|key| {
            countries
                .iter()
                .all(|country| country.metric_tier(*key) == ScoreTier::Strong)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Divergence {
    pub metric: MetricKey,
    pub display_name: &'static str,
    pub spread: f64,
}

fn spread(countries: &[Country], key: MetricKey) -> f64 {
    let scores = countries.iter().map(|country| country.metric_score(key));
    let max = scores.clone().fold(f64::MIN, f64::max);
    let min = scores.fold(f64::MAX, f64::min);
    max - min
}

/// Metric with the widest score range across the selection; the first
/// metric in the fixed ordering wins ties. `None` when every metric is
/// identical or fewer than two countries are given.
pub fn biggest_divergence(countries: &[Country]) -> Option<Divergence> {
    if countries.len() < MIN_COMPARISON_COUNTRIES {
        return None;
    }

    let mut best: Option<(MetricKey, f64)> = None;
    for key in metric_keys_of(countries) {
        let current = spread(countries, key);
        let widest = best.map(|(_, value)| value).unwrap_or(0.0);
        if current > widest && !scores_equal(current, widest) {
            best = Some((key, current));
        }
    }

    best.map(|(metric, spread)| Divergence {
        metric,
        display_name: metric.display_name(),
        spread,
    })
}

/// True when the selected countries do not all share one tier on `metric_key`.
pub fn has_metric_divergence(countries: &[Country], metric_key: MetricKey) -> bool {
    if countries.len() < MIN_COMPARISON_COUNTRIES {
        return false;
    }

    let tiers: HashSet<ScoreTier> = countries
        .iter()
        .map(|country| country.metric_tier(metric_key))
        .collect();
    tiers.len() > 1
}

pub fn metric_tier_distribution(countries: &[Country], metric_key: MetricKey) -> TierCounts {
    countries
        .iter()
        .map(|country| country.metric_tier(metric_key))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "text")]
pub enum ComparisonInsight {
    NeedMoreCountries,
    Insight(String),
}

impl ComparisonInsight {
    pub fn text(&self) -> &str {
        match self {
            Self::NeedMoreCountries => NEED_MORE_COUNTRIES,
            Self::Insight(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::NeedMoreCountries => NEED_MORE_COUNTRIES.to_string(),
            Self::Insight(text) => text,
        }
    }
}

fn join_names(countries: &[&Country]) -> String {
    countries
        .iter()
        .map(|country| country.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn verb(base: &str, subjects: usize) -> String {
    if subjects == 1 {
        format!("{base}s")
    } else {
        base.to_string()
    }
}

pub fn comparison_insight(countries: &[Country]) -> ComparisonInsight {
    if countries.len() < MIN_COMPARISON_COUNTRIES {
        return ComparisonInsight::NeedMoreCountries;
    }

    let shared = shared_high_metrics(countries);
    let metric_count = metric_keys_of(countries).len();
    let mut parts: Vec<String> = Vec::new();

    if shared.len() == 1 {
        parts.push(format!(
            "All countries excel in {}.",
            shared[0].display_name()
        ));
    } else if !shared.is_empty() && shared.len() == metric_count {
        parts.push(
            "All countries reach High Performer scores across every metric - a remarkable alignment of digital infrastructure excellence."
                .to_string(),
        );
    } else if !shared.is_empty() {
        let names: Vec<&str> = shared.iter().take(3).map(|key| key.display_name()).collect();
        parts.push(format!("Shared strengths: {}.", names.join(", ")));
    }

    if let Some(divergence) = biggest_divergence(countries) {
        let leaders: Vec<&Country> = countries
            .iter()
            .filter(|country| country.metric_tier(divergence.metric) == ScoreTier::Strong)
            .collect();
        let trailers: Vec<&Country> = countries
            .iter()
            .filter(|country| country.metric_tier(divergence.metric) == ScoreTier::Low)
            .collect();

        if !leaders.is_empty() && !trailers.is_empty() {
            parts.push(format!(
                "Biggest contrast in {}: {} {} while {} {}.",
                divergence.display_name,
                join_names(&leaders),
                verb("lead", leaders.len()),
                join_names(&trailers),
                verb("trail", trailers.len())
            ));
        } else {
            parts.push(format!(
                "{} shows the most variation across these countries.",
                divergence.display_name
            ));
        }
    }

    let top_tier = countries
        .iter()
        .filter(|country| country.overall_tier() == ScoreTier::Strong)
        .count();
    if top_tier == countries.len() {
        parts.push(
            "This comparison features top-tier digital nations - differences are in implementation details rather than capability."
                .to_string(),
        );
    } else if top_tier == 0 {
        parts.push(
            "These nations are developing their digital infrastructure with varying approaches and priorities."
                .to_string(),
        );
    }

    if parts.is_empty() {
        let all: Vec<&Country> = countries.iter().collect();
        return ComparisonInsight::Insight(format!(
            "Comparing {} reveals diverse approaches to digital infrastructure.",
            join_names(&all)
        ));
    }

    ComparisonInsight::Insight(parts.join(" "))
}

pub fn generate_comparison_insight(countries: &[Country]) -> String {
    comparison_insight(countries).into_text()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonCell {
    pub country_id: String,
    pub score: f64,
    pub tier: ScoreTier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub metric: MetricKey,
    pub display_name: &'static str,
    pub cells: Vec<ComparisonCell>,
    pub distribution: TierCounts,
    pub divergent: bool,
}

/// Side-by-side view of the selected countries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSummary {
    pub country_ids: Vec<String>,
    pub rows: Vec<ComparisonRow>,
    pub shared_strong_metrics: Vec<MetricKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biggest_divergence: Option<Divergence>,
    pub insight: ComparisonInsight,
}

impl ComparisonSummary {
    pub fn build(countries: &[Country]) -> Self {
        let rows = metric_keys_of(countries)
            .into_iter()
            .map(|metric| ComparisonRow {
                metric,
                display_name: metric.display_name(),
                cells: countries
                    .iter()
                    .map(|country| ComparisonCell {
                        country_id: country.id.clone(),
                        score: country.metric_score(metric),
                        tier: country.metric_tier(metric),
                    })
                    .collect(),
                distribution: metric_tier_distribution(countries, metric),
                divergent: has_metric_divergence(countries, metric),
            })
            .collect();

        debug!(countries = countries.len(), "built comparison summary");

        Self {
            country_ids: countries.iter().map(|country| country.id.clone()).collect(),
            rows,
            shared_strong_metrics: shared_high_metrics(countries),
            biggest_divergence: biggest_divergence(countries),
            insight: comparison_insight(countries),
        }
    }
}

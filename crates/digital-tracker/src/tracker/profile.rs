use super::domain::{Country, MetricKey, MetricSchema, Pillar, ScoreTier};
use super::metric_ranking::compute_all_metric_rankings;
use super::ranking::assign_ranks;
use super::scoring::round_one_decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileMetric {
    pub metric: MetricKey,
    pub display_name: &'static str,
    pub description: &'static str,
    pub score: f64,
    pub tier: ScoreTier,
    pub tier_label: &'static str,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_rank: Option<usize>,
}

/// A block of metrics on the detail page. Standard datasets produce one
/// section per pillar; legacy datasets a single ungrouped section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pillar: Option<Pillar>,
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    pub average_score: f64,
    pub metrics: Vec<ProfileMetric>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryProfile {
    pub country: Country,
    pub rank: usize,
    pub total_countries: usize,
    pub tier: ScoreTier,
    pub tier_label: &'static str,
    pub sections: Vec<ProfileSection>,
}

impl CountryProfile {
    /// Detail view for `id` (case-insensitive), ranked against the whole set.
    pub fn build(countries: &[Country], id: &str) -> Option<Self> {
        let ranked = assign_ranks(countries);
        let entry = ranked
            .into_iter()
            .find(|entry| entry.id.eq_ignore_ascii_case(id.trim()))?;
        let rankings = compute_all_metric_rankings(countries);
        let country = entry.country;

        let to_metric = |key: MetricKey| {
            let tier = country.metric_tier(key);
            ProfileMetric {
                metric: key,
                display_name: key.display_name(),
                description: key.description(),
                score: country.metric_score(key),
                tier,
                tier_label: tier.label(),
                summary: country
                    .metrics
                    .get(&key)
                    .map(|metric| metric.summary.clone())
                    .unwrap_or_default(),
                metric_rank: rankings.rank(&country.id, key),
            }
        };

        let is_standard = country
            .metric_keys()
            .next()
            .map(|key| MetricSchema::of_key(key) == MetricSchema::Standard)
            .unwrap_or(false);

        let sections = if is_standard {
            Pillar::ordered()
                .into_iter()
                .map(|pillar| {
                    let metrics: Vec<ProfileMetric> =
                        pillar.metric_keys().into_iter().map(&to_metric).collect();
                    ProfileSection {
                        pillar: Some(pillar),
                        title: pillar.label(),
                        description: Some(pillar.description()),
                        average_score: section_average(&metrics),
                        metrics,
                    }
                })
                .collect()
        } else {
            let metrics: Vec<ProfileMetric> = country.metric_keys().map(&to_metric).collect();
            vec![ProfileSection {
                pillar: None,
                title: "Metrics",
                description: None,
                average_score: section_average(&metrics),
                metrics,
            }]
        };

        let tier = country.overall_tier();
        Some(Self {
            rank: entry.rank,
            total_countries: countries.len(),
            tier,
            tier_label: tier.label(),
            sections,
            country,
        })
    }
}

fn section_average(metrics: &[ProfileMetric]) -> f64 {
    if metrics.is_empty() {
        return 0.0;
    }
    let sum: f64 = metrics.iter().map(|metric| metric.score).sum();
    round_one_decimal(sum / metrics.len() as f64)
}

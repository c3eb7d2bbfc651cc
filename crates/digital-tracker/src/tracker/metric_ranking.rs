use super::domain::{metric_keys_of, Country, MetricKey};
use super::ranking::compare_overall;
use super::scoring::compare_desc;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRankEntry {
    pub country_id: String,
    pub rank: usize,
}

/// Per-country lookup of the rank held on every metric.
pub type CountryMetricRanks = BTreeMap<MetricKey, usize>;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricRankings {
    ranks: HashMap<String, CountryMetricRanks>,
}

impl MetricRankings {
    pub fn for_country(&self, country_id: &str) -> Option<&CountryMetricRanks> {
        self.ranks.get(country_id)
    }

    pub fn rank(&self, country_id: &str, key: MetricKey) -> Option<usize> {
        self.ranks
            .get(country_id)
            .and_then(|ranks| ranks.get(&key))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CountryMetricRanks)> {
        self.ranks.iter()
    }
}

/// Ranks every country on one metric: metric score, then the global chain
/// (overall score, total score, strong count, name).
pub fn rank_countries_by_metric(countries: &[Country], metric_key: MetricKey) -> Vec<MetricRankEntry> {
    let mut sorted: Vec<&Country> = countries.iter().collect();
    sorted.sort_by(|a, b| {
        compare_desc(a.metric_score(metric_key), b.metric_score(metric_key))
            .then_with(|| compare_overall(a, b))
    });

    sorted
        .into_iter()
        .enumerate()
        .map(|(index, country)| MetricRankEntry {
            country_id: country.id.clone(),
            rank: index + 1,
        })
        .collect()
}

pub fn compute_all_metric_rankings(countries: &[Country]) -> MetricRankings {
    let mut ranks: HashMap<String, CountryMetricRanks> = countries
        .iter()
        .map(|country| (country.id.clone(), CountryMetricRanks::new()))
        .collect();

    let keys = metric_keys_of(countries);
    for key in &keys {
        for entry in rank_countries_by_metric(countries, *key) {
            if let Some(country_ranks) = ranks.get_mut(&entry.country_id) {
                country_ranks.insert(*key, entry.rank);
            }
        }
    }

    debug!(
        countries = countries.len(),
        metrics = keys.len(),
        "computed per-metric rankings"
    );

    MetricRankings { ranks }
}

/// `None` for an unknown country id or a metric the country does not carry.
pub fn get_country_metric_rank(
    rankings: &MetricRankings,
    country_id: &str,
    metric_key: MetricKey,
) -> Option<usize> {
    rankings.rank(country_id, metric_key)
}

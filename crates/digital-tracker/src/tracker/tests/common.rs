use std::collections::BTreeMap;

use crate::tracker::domain::{Country, MetricKey, MetricSchema, MetricScore, Region};
use crate::tracker::scoring::calculate_overall_score;

pub(super) fn standard_keys() -> &'static [MetricKey] {
    MetricSchema::Standard.keys()
}

/// Country carrying the standard metrics with `scores` in key order. Missing
/// trailing scores repeat the last value given.
pub(super) fn make_country(id: &str, name: &str, region: Region, scores: &[f64]) -> Country {
    let fallback = scores.last().copied().unwrap_or(0.0);
    let metrics: BTreeMap<MetricKey, MetricScore> = standard_keys()
        .iter()
        .enumerate()
        .map(|(index, key)| {
            (
                *key,
                MetricScore {
                    score: scores.get(index).copied().unwrap_or(fallback),
                    summary: format!("{name} {}", key.short_name()),
                },
            )
        })
        .collect();

    Country {
        id: id.to_string(),
        name: name.to_string(),
        region,
        flag: None,
        overall_score: calculate_overall_score(&metrics),
        metrics,
    }
}

pub(super) fn uniform_country(id: &str, name: &str, region: Region, score: f64) -> Country {
    make_country(id, name, region, &[score])
}

/// Country on the legacy six-metric schema with one score everywhere.
pub(super) fn legacy_country(id: &str, name: &str, region: Region, score: f64) -> Country {
    let metrics: BTreeMap<MetricKey, MetricScore> = MetricSchema::Legacy
        .keys()
        .iter()
        .map(|key| {
            (
                *key,
                MetricScore {
                    score,
                    summary: String::new(),
                },
            )
        })
        .collect();

    Country {
        id: id.to_string(),
        name: name.to_string(),
        region,
        flag: None,
        overall_score: calculate_overall_score(&metrics),
        metrics,
    }
}

/// Small mixed set:
/// - NOR 9.0 Europe (perfect scorer)
/// - SGP 8.5 Asia-Pacific
/// - URY 5.5 Americas, two strong metrics (rising potential)
/// - KEN 4.5 Middle East & Africa
/// - BOL 2.0 Americas
pub(super) fn sample_countries() -> Vec<Country> {
    vec![
        uniform_country("NOR", "Norway", Region::Europe, 9.0),
        uniform_country("SGP", "Singapore", Region::AsiaPacific, 8.5),
        make_country(
            "URY",
            "Uruguay",
            Region::Americas,
            &[8.0, 8.0, 6.0, 5.0, 5.0, 5.0, 5.0, 4.0, 4.0, 5.0],
        ),
        uniform_country("KEN", "Kenya", Region::MiddleEastAfrica, 4.5),
        uniform_country("BOL", "Bolivia", Region::Americas, 2.0),
    ]
}

pub(super) fn ids<C: AsRef<Country>>(countries: &[C]) -> Vec<&str> {
    countries
        .iter()
        .map(|country| country.as_ref().id.as_str())
        .collect()
}

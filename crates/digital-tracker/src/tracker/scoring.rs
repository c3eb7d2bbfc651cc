use super::domain::{Country, MetricKey, MetricScore, ScoreTier};
use std::cmp::Ordering;
use std::collections::BTreeMap;

pub const STRONG_THRESHOLD: f64 = 7.0;
pub const MODERATE_THRESHOLD: f64 = 4.0;
/// Every metric must reach this for a country to count as a perfect scorer.
pub const EXCELLENCE_THRESHOLD: f64 = 8.0;
/// Score differences below this are treated as ties.
pub const SCORE_EPSILON: f64 = 0.001;

/// Closed-open buckets: `[7, 10]` strong, `[4, 7)` moderate, everything
/// else (including NaN) low.
pub fn score_to_tier(score: f64) -> ScoreTier {
    if score >= STRONG_THRESHOLD {
        ScoreTier::Strong
    } else if score >= MODERATE_THRESHOLD {
        ScoreTier::Moderate
    } else {
        ScoreTier::Low
    }
}

pub fn tier_label(tier: ScoreTier) -> &'static str {
    tier.label()
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Mean of the metric scores rounded to one decimal; `0.0` when empty.
pub fn calculate_overall_score(metrics: &BTreeMap<MetricKey, MetricScore>) -> f64 {
    if metrics.is_empty() {
        return 0.0;
    }

    let sum: f64 = metrics.values().map(|metric| metric.score).sum();
    round_one_decimal(sum / metrics.len() as f64)
}

pub fn total_metric_score(country: &Country) -> f64 {
    country.metrics.values().map(|metric| metric.score).sum()
}

pub fn strong_metric_count(country: &Country) -> usize {
    country
        .metrics
        .values()
        .filter(|metric| metric.score >= STRONG_THRESHOLD)
        .count()
}

pub fn scores_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < SCORE_EPSILON
}

/// Descending comparison that reports `Equal` for values inside the epsilon
/// so callers fall through to their next tie-break key.
pub(crate) fn compare_desc(a: f64, b: f64) -> Ordering {
    if scores_equal(a, b) {
        Ordering::Equal
    } else {
        b.total_cmp(&a)
    }
}

/// Case-insensitive name ordering with a byte-wise fallback, so distinct
/// names never compare equal.
pub(crate) fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

mod insights;
mod summary;
pub mod views;

pub use insights::{generate_insights, metric_insight_text, regional_insight_text, spotlight};
pub use summary::{
    counts_by_tier, global_leader, metric_analysis, metric_distribution, perfect_scorers,
    regional_leader, regional_pioneer, regional_stats, rising_potential, strongest_metric,
    weakest_metric,
};
pub use views::{
    DashboardSummary, Insight, MetricAnalysisRow, MetricDistribution, RegionalStats, Spotlight,
    SpotlightCategory, TierCounts,
};

use super::domain::{Country, Region};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tunables for the dashboard heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Region the "outside of X" spotlight and dominance narratives compare against.
    pub reference_region: Region,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            reference_region: Region::Europe,
        }
    }
}

impl DashboardSummary {
    pub fn build(countries: &[Country], config: &AnalyticsConfig) -> Self {
        let regional = regional_stats(countries);
        let regional_insight = regional_insight_text(&regional, config);
        let summary = Self {
            counts: counts_by_tier(countries),
            metrics: metric_analysis(countries),
            perfect_scorers: perfect_scorers(countries)
                .into_iter()
                .map(|country| country.id.clone())
                .collect(),
            spotlight: spotlight(countries, config),
            insights: generate_insights(countries, config),
            metric_insight: metric_insight_text(countries),
            regional_insight,
            regional,
        };

        debug!(
            countries = summary.counts.total,
            insights = summary.insights.len(),
            spotlights = summary.spotlight.len(),
            "built dashboard summary"
        );
        summary
    }
}

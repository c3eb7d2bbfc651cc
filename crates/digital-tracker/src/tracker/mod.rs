//! Country tracker engine: ingestion, scoring, ranking, leaderboard views,
//! dashboard analytics and side-by-side comparison.
//!
//! Every engine function is a pure computation over a borrowed country slice.
//! Nothing is cached; callers recompute derived views on demand.

pub mod analytics;
pub mod comparison;
pub mod dataset;
pub mod domain;
pub mod leaderboard;
pub mod metric_ranking;
pub mod profile;
pub mod ranking;
pub mod scoring;

#[cfg(test)]
mod tests;

pub use analytics::{AnalyticsConfig, DashboardSummary};
pub use comparison::{
    ComparisonError, ComparisonInsight, ComparisonSelection, ComparisonSummary,
    MAX_COMPARISON_COUNTRIES, MIN_COMPARISON_COUNTRIES,
};
pub use dataset::{DatasetError, DatasetMetadata, TrackerData};
pub use domain::{
    Country, MetricKey, MetricSchema, MetricScore, Pillar, RankedCountry, Rating, Region,
    ScoreTier,
};
pub use leaderboard::{
    LeaderboardFilters, RegionFilter, SortColumn, SortDirection, SortState, TierFilter,
};
pub use metric_ranking::{MetricRankEntry, MetricRankings};
pub use profile::CountryProfile;
pub use ranking::assign_ranks;

use super::super::domain::{Country, MetricKey, Region, ScoreTier};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    pub strong: usize,
    pub moderate: usize,
    pub low: usize,
    pub total: usize,
}

impl TierCounts {
    pub fn record(&mut self, tier: ScoreTier) {
        match tier {
            ScoreTier::Strong => self.strong += 1,
            ScoreTier::Moderate => self.moderate += 1,
            ScoreTier::Low => self.low += 1,
        }
        self.total += 1;
    }

    pub fn get(&self, tier: ScoreTier) -> usize {
        match tier {
            ScoreTier::Strong => self.strong,
            ScoreTier::Moderate => self.moderate,
            ScoreTier::Low => self.low,
        }
    }
}

impl FromIterator<ScoreTier> for TierCounts {
    fn from_iter<I: IntoIterator<Item = ScoreTier>>(iter: I) -> Self {
        let mut counts = Self::default();
        for tier in iter {
            counts.record(tier);
        }
        counts
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionalStats {
    pub region: Region,
    pub region_label: &'static str,
    pub country_count: usize,
    pub tier_counts: TierCounts,
    pub average_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_performer: Option<Country>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricDistribution {
    pub metric: MetricKey,
    pub display_name: &'static str,
    pub counts: TierCounts,
    pub average_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricAnalysisRow {
    #[serde(flatten)]
    pub distribution: MetricDistribution,
    pub is_strongest: bool,
    pub is_weakest: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub id: &'static str,
    pub title: &'static str,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpotlightCategory {
    Leader,
    RisingPotential,
    RegionalPioneer,
}

impl SpotlightCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Leader => "The Leader",
            Self::RisingPotential => "Rising Potential",
            Self::RegionalPioneer => "Regional Pioneer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spotlight {
    pub country: Country,
    pub category: SpotlightCategory,
    pub category_label: &'static str,
    pub label: String,
    pub description: String,
}

/// Everything the insights dashboard renders, computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub counts: TierCounts,
    pub regional: Vec<RegionalStats>,
    pub metrics: Vec<MetricAnalysisRow>,
    pub perfect_scorers: Vec<String>,
    pub spotlight: Vec<Spotlight>,
    pub insights: Vec<Insight>,
    pub regional_insight: String,
    pub metric_insight: String,
}

use super::super::domain::Country;
use super::super::ranking::assign_ranks;
use super::super::scoring::{strong_metric_count, EXCELLENCE_THRESHOLD};
use super::summary::{
    counts_by_tier, global_leader, perfect_scorers, regional_pioneer, regional_stats,
    rising_potential, strongest_metric, weakest_metric,
};
use super::views::{Insight, RegionalStats, Spotlight, SpotlightCategory};
use super::AnalyticsConfig;

pub fn generate_insights(countries: &[Country], config: &AnalyticsConfig) -> Vec<Insight> {
    let counts = counts_by_tier(countries);
    let regional = regional_stats(countries);
    let reference = config.reference_region;
    let mut insights = Vec::new();

    if let Some(stats) = regional
        .iter()
        .find(|stats| stats.region == reference && stats.tier_counts.strong > 0)
    {
        insights.push(Insight {
            id: "regional-dominance",
            title: "Regional Dominance",
            description: format!(
                "{} of {} High Performers are in {}, establishing the region as the global leader in digital infrastructure.",
                stats.tier_counts.strong,
                counts.strong,
                reference.label()
            ),
        });
    }

    if let Some(weakest) = weakest_metric(countries) {
        insights.push(Insight {
            id: "global-challenge",
            title: "Global Challenge",
            description: format!(
                "{} shows the most room for improvement globally, averaging {:.1} out of 10 with {} High Performer{}.",
                weakest.display_name,
                weakest.average_score,
                weakest.counts.strong,
                if weakest.counts.strong == 1 { "" } else { "s" }
            ),
        });
    }

    let perfect = perfect_scorers(countries);
    if let Some(pioneer) = assign_ranks(&perfect).into_iter().next() {
        insights.push(Insight {
            id: "digital-pioneer",
            title: "Digital Pioneer",
            description: format!(
                "{} scores {:.0} or higher across all {} dimensions, setting the benchmark for comprehensive digital infrastructure.",
                pioneer.name,
                EXCELLENCE_THRESHOLD,
                pioneer.metrics.len()
            ),
        });
    }

    if let Some(strongest) = strongest_metric(countries) {
        insights.push(Insight {
            id: "global-strength",
            title: "Global Strength",
            description: format!(
                "{} shows the most global progress, averaging {:.1} out of 10 with {} High Performer{}.",
                strongest.display_name,
                strongest.average_score,
                strongest.counts.strong,
                if strongest.counts.strong == 1 { "" } else { "s" }
            ),
        });
    }

    insights
}

pub fn regional_insight_text(stats: &[RegionalStats], config: &AnalyticsConfig) -> String {
    let total_strong: usize = stats.iter().map(|entry| entry.tier_counts.strong).sum();
    let reference = stats
        .iter()
        .find(|entry| entry.region == config.reference_region);

    match reference {
        Some(entry) if total_strong > 0 => {
            let share = (entry.tier_counts.strong as f64 / total_strong as f64 * 100.0).round();
            format!(
                "{} accounts for {:.0}% of all High Performers, establishing clear regional leadership in digital infrastructure.",
                entry.region_label, share
            )
        }
        _ => "Regional distribution shows varied progress across different geographic areas."
            .to_string(),
    }
}

pub fn metric_insight_text(countries: &[Country]) -> String {
    match (strongest_metric(countries), weakest_metric(countries)) {
        (Some(strongest), Some(weakest)) => format!(
            "{} shows the most global adoption with an average of {:.1}, while {} presents the greatest opportunity for improvement at {:.1}.",
            strongest.display_name,
            strongest.average_score,
            weakest.display_name,
            weakest.average_score
        ),
        _ => "No metric data is available yet.".to_string(),
    }
}

/// Up to three featured countries: the leader, a rising contender, and the
/// best performer outside the reference region.
pub fn spotlight(countries: &[Country], config: &AnalyticsConfig) -> Vec<Spotlight> {
    let mut spotlights = Vec::new();

    if let Some(leader) = global_leader(countries) {
        spotlights.push(Spotlight {
            country: leader.clone(),
            category: SpotlightCategory::Leader,
            category_label: SpotlightCategory::Leader.label(),
            label: "Digital Pioneer".to_string(),
            description: "Setting the global standard for citizen-centric digital infrastructure."
                .to_string(),
        });
    }

    if let Some(rising) = rising_potential(countries) {
        spotlights.push(Spotlight {
            country: rising.clone(),
            category: SpotlightCategory::RisingPotential,
            category_label: SpotlightCategory::RisingPotential.label(),
            label: "Emerging Contender".to_string(),
            description: format!(
                "Strong performance in {} key dimensions signals rapid digital transformation.",
                strong_metric_count(rising)
            ),
        });
    }

    if let Some(pioneer) = regional_pioneer(countries, config.reference_region) {
        spotlights.push(Spotlight {
            country: pioneer.clone(),
            category: SpotlightCategory::RegionalPioneer,
            category_label: SpotlightCategory::RegionalPioneer.label(),
            label: format!("{} Leader", pioneer.region.label()),
            description: format!(
                "Leading digital infrastructure innovation outside of {}.",
                config.reference_region.label()
            ),
        });
    }

    spotlights
}

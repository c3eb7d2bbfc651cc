use super::super::domain::{metric_keys_of, Country, Region, ScoreTier};
use super::super::ranking::{compare_overall, top_ranked};
use super::super::scoring::{
    round_one_decimal, scores_equal, strong_metric_count, EXCELLENCE_THRESHOLD,
};
use super::views::{MetricAnalysisRow, MetricDistribution, RegionalStats, TierCounts};
use std::cmp::Ordering;

fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        0.0
    } else {
        round_one_decimal(sum / count as f64)
    }
}

pub fn counts_by_tier(countries: &[Country]) -> TierCounts {
    countries.iter().map(Country::overall_tier).collect()
}

/// Best country of `region` under the global tie-break chain.
pub fn regional_leader(region: Region, countries: &[Country]) -> Option<&Country> {
    top_ranked(countries.iter().filter(|country| country.region == region))
}

/// Per-region breakdown for every region that has at least one country,
/// most strong countries first; equal counts keep the fixed region order.
pub fn regional_stats(countries: &[Country]) -> Vec<RegionalStats> {
    let mut stats: Vec<RegionalStats> = Region::ordered()
        .into_iter()
        .filter_map(|region| {
            let members: Vec<&Country> = countries
                .iter()
                .filter(|country| country.region == region)
                .collect();
            if members.is_empty() {
                return None;
            }

            Some(RegionalStats {
                region,
                region_label: region.label(),
                country_count: members.len(),
                tier_counts: members.iter().map(|country| country.overall_tier()).collect(),
                average_score: mean(members.iter().map(|country| country.overall_score)),
                top_performer: top_ranked(members.iter().copied()).cloned(),
            })
        })
        .collect();

    stats.sort_by(|a, b| b.tier_counts.strong.cmp(&a.tier_counts.strong));
    stats
}

pub fn metric_distribution(countries: &[Country]) -> Vec<MetricDistribution> {
    metric_keys_of(countries)
        .into_iter()
        .map(|metric| MetricDistribution {
            metric,
            display_name: metric.display_name(),
            counts: countries
                .iter()
                .map(|country| country.metric_tier(metric))
                .collect(),
            average_score: mean(countries.iter().map(|country| country.metric_score(metric))),
        })
        .collect()
}

/// Walks the distributions in metric order and keeps the first entry that
/// no later entry beats by more than the score epsilon.
fn pick_metric(
    distributions: Vec<MetricDistribution>,
    prefer: Ordering,
) -> Option<MetricDistribution> {
    distributions.into_iter().reduce(|best, current| {
        let ordering = current.average_score.total_cmp(&best.average_score);
        if ordering == prefer && !scores_equal(current.average_score, best.average_score) {
            current
        } else {
            best
        }
    })
}

pub fn strongest_metric(countries: &[Country]) -> Option<MetricDistribution> {
    pick_metric(metric_distribution(countries), Ordering::Greater)
}

pub fn weakest_metric(countries: &[Country]) -> Option<MetricDistribution> {
    pick_metric(metric_distribution(countries), Ordering::Less)
}

pub fn metric_analysis(countries: &[Country]) -> Vec<MetricAnalysisRow> {
    let strongest = strongest_metric(countries).map(|row| row.metric);
    let weakest = weakest_metric(countries).map(|row| row.metric);

    metric_distribution(countries)
        .into_iter()
        .map(|distribution| MetricAnalysisRow {
            is_strongest: Some(distribution.metric) == strongest,
            is_weakest: Some(distribution.metric) == weakest,
            distribution,
        })
        .collect()
}

/// Countries scoring at least the excellence threshold on every metric.
pub fn perfect_scorers(countries: &[Country]) -> Vec<&Country> {
    countries
        .iter()
        .filter(|country| {
            !country.metrics.is_empty()
                && country
                    .metrics
                    .values()
                    .all(|metric| metric.score >= EXCELLENCE_THRESHOLD)
        })
        .collect()
}

pub fn global_leader(countries: &[Country]) -> Option<&Country> {
    top_ranked(countries)
}

/// A developing country with two or more strong metrics. The candidate with
/// the most strong metrics wins; equal counts fall back to the global chain.
pub fn rising_potential(countries: &[Country]) -> Option<&Country> {
    countries
        .iter()
        .filter(|country| country.overall_tier() == ScoreTier::Moderate)
        .map(|country| (country, strong_metric_count(country)))
        .filter(|(_, strong)| *strong >= 2)
        .min_by(|(a, a_strong), (b, b_strong)| {
            b_strong.cmp(a_strong).then_with(|| compare_overall(a, b))
        })
        .map(|(country, _)| country)
}

/// Global leader among countries outside `reference_region`.
pub fn regional_pioneer(countries: &[Country], reference_region: Region) -> Option<&Country> {
    top_ranked(
        countries
            .iter()
            .filter(|country| country.region != reference_region),
    )
}

use std::collections::BTreeSet;

use super::common::*;
use crate::tracker::domain::{Country, MetricKey, Region};
use crate::tracker::metric_ranking::{
    compute_all_metric_rankings, get_country_metric_rank, rank_countries_by_metric,
};

#[test]
fn metric_ranking_uses_metric_value_first() {
    let countries = sample_countries();
    let ranking = rank_countries_by_metric(&countries, MetricKey::EGovServiceDepth);
    let order: Vec<&str> = ranking.iter().map(|entry| entry.country_id.as_str()).collect();
    assert_eq!(order, vec!["NOR", "SGP", "URY", "KEN", "BOL"]);

    // Uruguay has the better overall score but trails Kenya on payments.
    let ranking = rank_countries_by_metric(&countries, MetricKey::CrossBorderPayments);
    let order: Vec<&str> = ranking.iter().map(|entry| entry.country_id.as_str()).collect();
    assert_eq!(order, vec!["NOR", "SGP", "KEN", "URY", "BOL"]);
}

#[test]
fn equal_metric_values_fall_back_to_overall_score() {
    let countries = vec![
        make_country(
            "LOW",
            "Alpha",
            Region::Europe,
            &[9.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0],
        ),
        make_country(
            "HIG",
            "Zulu",
            Region::Europe,
            &[9.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0],
        ),
    ];

    let ranking = rank_countries_by_metric(&countries, MetricKey::EGovServiceDepth);
    assert_eq!(ranking[0].country_id, "HIG");
    assert_eq!(ranking[1].country_id, "LOW");
}

#[test]
fn identical_countries_rank_by_name() {
    let countries = vec![
        uniform_country("ZZZ", "Zeta", Region::Europe, 5.0),
        uniform_country("AAA", "Alpha", Region::Europe, 5.0),
    ];

    let ranking = rank_countries_by_metric(&countries, MetricKey::StablecoinAdoption);
    assert_eq!(ranking[0].country_id, "AAA");
    assert_eq!(ranking[0].rank, 1);
    assert_eq!(ranking[1].country_id, "ZZZ");
    assert_eq!(ranking[1].rank, 2);
}

#[test]
fn every_metric_ranking_is_a_permutation() {
    let countries = sample_countries();
    let rankings = compute_all_metric_rankings(&countries);
    assert_eq!(rankings.len(), countries.len());

    for key in standard_keys() {
        let ranks: BTreeSet<usize> = countries
            .iter()
            .filter_map(|country| rankings.rank(&country.id, *key))
            .collect();
        assert_eq!(ranks, (1..=countries.len()).collect::<BTreeSet<_>>(), "{key:?}");
    }
}

#[test]
fn lookup_miss_returns_none() {
    let rankings = compute_all_metric_rankings(&sample_countries());
    assert_eq!(
        get_country_metric_rank(&rankings, "NOR", MetricKey::EGovServiceDepth),
        Some(1)
    );
    assert_eq!(
        get_country_metric_rank(&rankings, "XXX", MetricKey::EGovServiceDepth),
        None
    );
    assert_eq!(
        get_country_metric_rank(&rankings, "NOR", MetricKey::UserSovereignty),
        None
    );
}

#[test]
fn empty_set_has_no_rankings() {
    let countries: Vec<Country> = Vec::new();
    assert!(compute_all_metric_rankings(&countries).is_empty());
    assert!(rank_countries_by_metric(&countries, MetricKey::EGovServiceDepth).is_empty());
}

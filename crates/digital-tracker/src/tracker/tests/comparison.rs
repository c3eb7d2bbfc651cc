use super::common::*;
use crate::tracker::comparison::{
    biggest_divergence, build_compare_path, comparison_insight, generate_comparison_insight,
    has_metric_divergence, metric_tier_distribution, parse_country_ids, shared_high_metrics,
    ComparisonError, ComparisonInsight, ComparisonSelection, ComparisonSummary,
};
use crate::tracker::domain::{Country, MetricKey, Region};

fn pick(ids: &[&str]) -> Vec<Country> {
    let all = sample_countries();
    ids.iter()
        .filter_map(|id| all.iter().find(|country| country.id == *id).cloned())
        .collect()
}

#[test]
fn empty_comparison_asks_for_more_countries() {
    assert_eq!(comparison_insight(&[]), ComparisonInsight::NeedMoreCountries);
    assert_eq!(
        generate_comparison_insight(&[]),
        "Select at least two countries to see comparison insights."
    );
    assert_eq!(
        comparison_insight(&pick(&["NOR"])),
        ComparisonInsight::NeedMoreCountries
    );
}

#[test]
fn fewer_than_two_countries_share_nothing() {
    let single = pick(&["NOR"]);
    assert!(shared_high_metrics(&single).is_empty());
    assert!(biggest_divergence(&single).is_none());
    assert!(!has_metric_divergence(&single, MetricKey::EGovServiceDepth));
}

#[test]
fn shared_metrics_require_every_country_strong() {
    let countries = pick(&["NOR", "URY"]);
    assert_eq!(
        shared_high_metrics(&countries),
        vec![MetricKey::EGovServiceDepth, MetricKey::DigitalIdentityInfra]
    );
    assert!(shared_high_metrics(&pick(&["NOR", "BOL"])).is_empty());
}

#[test]
fn divergence_picks_widest_spread_with_first_key_on_ties() {
    let countries = pick(&["NOR", "URY"]);
    let divergence = biggest_divergence(&countries).expect("scores differ");
    assert_eq!(divergence.metric, MetricKey::CrossBorderPayments);
    assert_eq!(divergence.spread, 5.0);

    let uniform = pick(&["NOR", "BOL"]);
    assert_eq!(
        biggest_divergence(&uniform).map(|divergence| divergence.metric),
        Some(MetricKey::EGovServiceDepth)
    );
}

#[test]
fn identical_countries_have_no_divergence() {
    let countries = vec![
        uniform_country("AAA", "Alpha", Region::Europe, 5.0),
        uniform_country("BBB", "Beta", Region::Americas, 5.0),
    ];
    assert!(biggest_divergence(&countries).is_none());
}

#[test]
fn divergence_flag_is_order_independent() {
    let forward = pick(&["NOR", "URY", "KEN"]);
    let mut backward = forward.clone();
    backward.reverse();

    for key in standard_keys() {
        assert_eq!(
            has_metric_divergence(&forward, *key),
            has_metric_divergence(&backward, *key),
            "{key:?}"
        );
    }
    assert!(!has_metric_divergence(&pick(&["NOR", "SGP"]), MetricKey::EGovServiceDepth));
    assert!(has_metric_divergence(&forward, MetricKey::EGovServiceDepth));
}

#[test]
fn tier_distribution_counts_selected_countries() {
    let counts = metric_tier_distribution(&pick(&["NOR", "KEN", "BOL"]), MetricKey::StablecoinAdoption);
    assert_eq!((counts.strong, counts.moderate, counts.low), (1, 1, 1));
    assert_eq!(counts.total, 3);
}

#[test]
fn insight_for_fully_aligned_leaders() {
    let text = generate_comparison_insight(&pick(&["NOR", "SGP"]));
    assert_eq!(
        text,
        "All countries reach High Performer scores across every metric - a remarkable alignment of digital infrastructure excellence. \
eGovernment Service Depth shows the most variation across these countries. \
This comparison features top-tier digital nations - differences are in implementation details rather than capability."
    );
}

#[test]
fn insight_names_leaders_and_trailers() {
    let text = generate_comparison_insight(&pick(&["NOR", "BOL"]));
    assert_eq!(
        text,
        "Biggest contrast in eGovernment Service Depth: Norway leads while Bolivia trails."
    );
}

#[test]
fn insight_lists_shared_strengths() {
    let text = generate_comparison_insight(&pick(&["NOR", "URY"]));
    assert!(text.starts_with(
        "Shared strengths: eGovernment Service Depth, Digital Identity Infrastructure."
    ));
    // Uruguay's 4.0 on payments is developing, not emerging, so nobody trails.
    assert!(text.ends_with("Cross-Border Payments shows the most variation across these countries."));
}

#[test]
fn insight_for_single_shared_strength() {
    let countries = vec![
        make_country("AAA", "Alpha", Region::Europe, &[9.0, 5.0]),
        make_country("BBB", "Beta", Region::Europe, &[8.0, 5.0]),
    ];
    let text = generate_comparison_insight(&countries);
    assert!(text.starts_with("All countries excel in eGovernment Service Depth."));
}

#[test]
fn insight_for_developing_selection() {
    let text = generate_comparison_insight(&pick(&["KEN", "BOL"]));
    assert_eq!(
        text,
        "eGovernment Service Depth shows the most variation across these countries. \
These nations are developing their digital infrastructure with varying approaches and priorities."
    );
}

#[test]
fn insight_falls_back_when_nothing_stands_out() {
    let alpha = uniform_country("AAA", "Alpha", Region::Europe, 5.0);
    let mut beta = uniform_country("BBB", "Beta", Region::Europe, 5.0);
    beta.overall_score = 7.5;

    assert_eq!(
        generate_comparison_insight(&[alpha, beta]),
        "Comparing Alpha, Beta reveals diverse approaches to digital infrastructure."
    );
}

#[test]
fn country_ids_are_normalized() {
    assert_eq!(
        parse_country_ids(" est, sgp,,EST "),
        vec!["EST".to_string(), "SGP".to_string()]
    );
    assert!(parse_country_ids("").is_empty());
    assert_eq!(build_compare_path(&[]), "/compare");
    assert_eq!(
        build_compare_path(&["EST".to_string(), "SGP".to_string()]),
        "/compare?countries=EST,SGP"
    );
}

#[test]
fn selection_resolves_in_request_order() {
    let countries = sample_countries();
    let ids = parse_country_ids("sgp,xyz,nor");
    let selection = ComparisonSelection::resolve(&countries, &ids).expect("within cap");

    assert_eq!(ids_of(&selection.countries), vec!["SGP", "NOR"]);
    assert_eq!(selection.unknown_ids, vec!["XYZ".to_string()]);
}

#[test]
fn selection_enforces_four_country_cap() {
    let ids = parse_country_ids("NOR,SGP,URY,KEN,BOL");
    let error = ComparisonSelection::resolve(&sample_countries(), &ids).expect_err("over cap");
    assert_eq!(
        error,
        ComparisonError::TooManyCountries {
            requested: 5,
            max: 4
        }
    );
}

#[test]
fn summary_builds_one_row_per_metric() {
    let countries = pick(&["NOR", "URY", "BOL"]);
    let summary = ComparisonSummary::build(&countries);

    assert_eq!(summary.country_ids, vec!["NOR", "URY", "BOL"]);
    assert_eq!(summary.rows.len(), 10);
    assert!(summary.rows.iter().all(|row| row.cells.len() == 3));
    assert!(summary.rows.iter().all(|row| row.divergent));
    assert!(summary.shared_strong_metrics.is_empty());
    assert!(matches!(summary.insight, ComparisonInsight::Insight(_)));
}

fn ids_of(countries: &[Country]) -> Vec<&str> {
    countries.iter().map(|country| country.id.as_str()).collect()
}

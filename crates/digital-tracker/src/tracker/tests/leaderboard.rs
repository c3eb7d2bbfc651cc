use super::common::*;
use crate::tracker::domain::{MetricKey, Region, ScoreTier};
use crate::tracker::leaderboard::{
    count_by_score_tier, get_leaderboard_data, next_sort_direction, sort_countries,
    write_leaderboard_csv, LeaderboardFilters, RegionFilter, SortColumn, SortDirection, SortState,
    TierFilter,
};
use crate::tracker::ranking::assign_ranks;

#[test]
fn region_filter_reranks_visible_subset() {
    let filters = LeaderboardFilters::from_query(Some("americas"), None);
    let rows = get_leaderboard_data(&sample_countries(), &filters, &SortState::default());

    assert_eq!(ids(&rows), vec!["URY", "BOL"]);
    assert_eq!(rows.iter().map(|row| row.rank).collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn filters_combine_with_and() {
    let filters = LeaderboardFilters {
        region: RegionFilter::Only(Region::Americas),
        tier: TierFilter::Only(ScoreTier::Low),
    };
    let rows = get_leaderboard_data(&sample_countries(), &filters, &SortState::default());
    assert_eq!(ids(&rows), vec!["BOL"]);
    assert_eq!(rows[0].rank, 1);

    let filters = LeaderboardFilters::from_query(None, Some("Medium"));
    let rows = get_leaderboard_data(&sample_countries(), &filters, &SortState::default());
    assert_eq!(ids(&rows), vec!["URY", "KEN"]);
}

#[test]
fn unknown_filter_values_are_inactive() {
    let filters = LeaderboardFilters::from_query(Some("Antarctica"), Some("legendary"));
    assert_eq!(filters, LeaderboardFilters::default());

    let rows = get_leaderboard_data(&sample_countries(), &filters, &SortState::default());
    assert_eq!(rows.len(), 5);
}

#[test]
fn filter_matching_nothing_yields_empty_view() {
    let filters = LeaderboardFilters {
        region: RegionFilter::Only(Region::Europe),
        tier: TierFilter::Only(ScoreTier::Low),
    };
    assert!(get_leaderboard_data(&sample_countries(), &filters, &SortState::default()).is_empty());
}

#[test]
fn name_sort_keeps_global_ranks() {
    let sort = SortState::new(SortColumn::Name, SortDirection::Ascending);
    let rows = get_leaderboard_data(&sample_countries(), &LeaderboardFilters::default(), &sort);

    assert_eq!(ids(&rows), vec!["BOL", "KEN", "NOR", "SGP", "URY"]);
    assert_eq!(rows[0].rank, 5);
    assert_eq!(rows[2].rank, 1);
}

#[test]
fn metric_sort_orders_by_metric_value() {
    let sort = SortState::new(
        SortColumn::Metric(MetricKey::EGovServiceDepth),
        SortDirection::Ascending,
    );
    let rows = get_leaderboard_data(&sample_countries(), &LeaderboardFilters::default(), &sort);
    assert_eq!(ids(&rows), vec!["BOL", "KEN", "URY", "SGP", "NOR"]);
}

#[test]
fn equal_sort_values_keep_names_ascending_in_both_directions() {
    let countries = vec![
        uniform_country("ZZZ", "Zeta", Region::Europe, 5.0),
        uniform_country("AAA", "Alpha", Region::Europe, 5.0),
        uniform_country("TOP", "Top", Region::Europe, 9.0),
    ];
    let ranked = assign_ranks(&countries);

    let descending = sort_countries(
        &ranked,
        &SortState::new(SortColumn::Overall, SortDirection::Descending),
    );
    assert_eq!(ids(&descending), vec!["TOP", "AAA", "ZZZ"]);

    let ascending = sort_countries(
        &ranked,
        &SortState::new(SortColumn::Overall, SortDirection::Ascending),
    );
    assert_eq!(ids(&ascending), vec!["AAA", "ZZZ", "TOP"]);
}

#[test]
fn sort_direction_cycles_through_three_states() {
    assert_eq!(next_sort_direction(None), Some(SortDirection::Descending));
    assert_eq!(
        next_sort_direction(Some(SortDirection::Descending)),
        Some(SortDirection::Ascending)
    );
    assert_eq!(next_sort_direction(Some(SortDirection::Ascending)), None);
}

#[test]
fn toggling_a_new_column_resets_to_descending() {
    let state = SortState::default().toggle(SortColumn::Name);
    assert_eq!(state, SortState::new(SortColumn::Name, SortDirection::Descending));

    let state = state.toggle(SortColumn::Name);
    assert_eq!(state.direction, Some(SortDirection::Ascending));

    let switched = state.toggle(SortColumn::Overall);
    assert_eq!(
        switched,
        SortState::new(SortColumn::Overall, SortDirection::Descending)
    );

    let cleared = state.toggle(SortColumn::Name);
    assert_eq!(cleared, SortState::default());
}

#[test]
fn sort_state_from_query_requires_both_parts() {
    assert_eq!(
        SortState::from_query(Some("stablecoinAdoption"), Some("asc")),
        SortState::new(
            SortColumn::Metric(MetricKey::StablecoinAdoption),
            SortDirection::Ascending
        )
    );
    assert_eq!(SortState::from_query(Some("overall"), None), SortState::default());
    assert_eq!(
        SortState::from_query(Some("bogus"), Some("desc")),
        SortState::default()
    );
}

#[test]
fn active_filters_include_sorting() {
    let filters = LeaderboardFilters::default();
    assert!(!filters.has_active_filters(&SortState::default()));
    assert!(filters.has_active_filters(&SortState::new(SortColumn::Name, SortDirection::Ascending)));
    assert!(LeaderboardFilters::from_query(Some("europe"), None)
        .has_active_filters(&SortState::default()));
}

#[test]
fn tier_histogram_counts_every_country() {
    let counts = count_by_score_tier(&sample_countries());
    assert_eq!(counts.get(&ScoreTier::Strong), Some(&2));
    assert_eq!(counts.get(&ScoreTier::Moderate), Some(&2));
    assert_eq!(counts.get(&ScoreTier::Low), Some(&1));
}

#[test]
fn csv_export_writes_header_and_rows() {
    let rows = get_leaderboard_data(
        &sample_countries(),
        &LeaderboardFilters::default(),
        &SortState::default(),
    );
    let mut buffer = Vec::new();
    write_leaderboard_csv(&rows, &mut buffer).expect("csv written");

    let text = String::from_utf8(buffer).expect("utf8");
    let mut lines = text.lines();
    let header = lines.next().expect("header");
    assert!(header.starts_with("rank,id,name,region,overall_score,tier,eGovServiceDepth"));
    assert!(header.ends_with("cryptoDigitalLiteracy"));
    assert_eq!(
        lines.next(),
        Some("1,NOR,Norway,Europe,9.0,High Performers,9.0,9.0,9.0,9.0,9.0,9.0,9.0,9.0,9.0,9.0")
    );
    assert_eq!(text.lines().count(), 6);
}

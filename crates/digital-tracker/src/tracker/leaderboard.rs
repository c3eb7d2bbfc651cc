use super::domain::{metric_keys_of, Country, MetricKey, RankedCountry, Region, ScoreTier};
use super::ranking::assign_ranks;
use super::scoring::{compare_names, score_to_tier};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::io::Write;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum RegionFilter {
    #[default]
    All,
    Only(Region),
}

impl RegionFilter {
    /// Unknown values leave the filter inactive.
    pub fn parse(value: Option<&str>) -> Self {
        value.and_then(Region::parse).map(Self::Only).unwrap_or_default()
    }

    fn matches(self, country: &Country) -> bool {
        match self {
            Self::All => true,
            Self::Only(region) => country.region == region,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum TierFilter {
    #[default]
    All,
    Only(ScoreTier),
}

impl TierFilter {
    /// Accepts tier names (`strong`) and ratings (`High`); anything else is
    /// treated as "all".
    pub fn parse(value: Option<&str>) -> Self {
        value.and_then(ScoreTier::parse).map(Self::Only).unwrap_or_default()
    }

    fn matches(self, country: &Country) -> bool {
        match self {
            Self::All => true,
            Self::Only(tier) => country.overall_tier() == tier,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LeaderboardFilters {
    pub region: RegionFilter,
    pub tier: TierFilter,
}

impl LeaderboardFilters {
    pub fn from_query(region: Option<&str>, tier: Option<&str>) -> Self {
        Self {
            region: RegionFilter::parse(region),
            tier: TierFilter::parse(tier),
        }
    }

    pub fn matches(&self, country: &Country) -> bool {
        self.region.matches(country) && self.tier.matches(country)
    }

    pub fn has_active_filters(&self, sort: &SortState) -> bool {
        self.region != RegionFilter::All || self.tier != TierFilter::All || sort.column.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Ascending),
            "desc" | "descending" => Some(Self::Descending),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "metric")]
pub enum SortColumn {
    Name,
    Overall,
    Metric(MetricKey),
}

impl SortColumn {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "name" => Some(Self::Name),
            "overall" => Some(Self::Overall),
            other => MetricKey::parse(other).map(Self::Metric),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Overall => "overall",
            Self::Metric(key) => key.as_str(),
        }
    }
}

/// Tri-state cycle: none → descending → ascending → none.
pub fn next_sort_direction(current: Option<SortDirection>) -> Option<SortDirection> {
    match current {
        None => Some(SortDirection::Descending),
        Some(SortDirection::Descending) => Some(SortDirection::Ascending),
        Some(SortDirection::Ascending) => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SortState {
    pub column: Option<SortColumn>,
    pub direction: Option<SortDirection>,
}

impl SortState {
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self {
            column: Some(column),
            direction: Some(direction),
        }
    }

    /// Builds sort state from raw query values, dropping anything invalid.
    pub fn from_query(column: Option<&str>, direction: Option<&str>) -> Self {
        let column = column.and_then(SortColumn::parse);
        let direction = direction.and_then(SortDirection::parse);
        match (column, direction) {
            (Some(column), Some(direction)) => Self::new(column, direction),
            _ => Self::default(),
        }
    }

    /// State after the user activates `column`: the same column advances
    /// through the cycle, a different one starts descending.
    pub fn toggle(&self, column: SortColumn) -> Self {
        if self.column == Some(column) {
            match next_sort_direction(self.direction) {
                Some(direction) => Self::new(column, direction),
                None => Self::default(),
            }
        } else {
            Self::new(column, SortDirection::Descending)
        }
    }

    fn active(&self) -> Option<(SortColumn, SortDirection)> {
        self.column.zip(self.direction)
    }
}

pub fn filter_countries(countries: &[Country], filters: &LeaderboardFilters) -> Vec<Country> {
    countries
        .iter()
        .filter(|country| filters.matches(country))
        .cloned()
        .collect()
}

fn sort_value(country: &Country, column: SortColumn) -> f64 {
    match column {
        SortColumn::Overall => country.overall_score,
        SortColumn::Metric(key) => country.metric_score(key),
        SortColumn::Name => 0.0,
    }
}

fn compare_by_column(a: &Country, b: &Country, column: SortColumn, direction: SortDirection) -> Ordering {
    let ordering = match column {
        SortColumn::Name => compare_names(&a.name, &b.name),
        _ => match sort_value(a, column).total_cmp(&sort_value(b, column)) {
            Ordering::Equal => return compare_names(&a.name, &b.name),
            ordering => ordering,
        },
    };

    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Orders a copy of `countries` by the sort state. Without an active column
/// the order is overall score descending with names ascending on ties.
pub fn sort_countries<T>(countries: &[T], sort: &SortState) -> Vec<T>
where
    T: AsRef<Country> + Clone,
{
    let mut sorted = countries.to_vec();
    match sort.active() {
        Some((column, direction)) => {
            sorted.sort_by(|a, b| compare_by_column(a.as_ref(), b.as_ref(), column, direction))
        }
        None => sorted.sort_by(|a, b| {
            let (a, b) = (a.as_ref(), b.as_ref());
            b.overall_score
                .total_cmp(&a.overall_score)
                .then_with(|| compare_names(&a.name, &b.name))
        }),
    }
    sorted
}

/// Filters, ranks the visible subset, then sorts. Ranks describe position
/// among the filtered countries only, so `#1` is the best visible country.
pub fn get_leaderboard_data(
    countries: &[Country],
    filters: &LeaderboardFilters,
    sort: &SortState,
) -> Vec<RankedCountry> {
    let filtered = filter_countries(countries, filters);
    let ranked = assign_ranks(&filtered);
    debug!(
        total = countries.len(),
        visible = ranked.len(),
        "built leaderboard view"
    );
    sort_countries(&ranked, sort)
}

pub fn count_by_score_tier(countries: &[Country]) -> BTreeMap<ScoreTier, usize> {
    countries.iter().fold(BTreeMap::new(), |mut counts, country| {
        *counts.entry(score_to_tier(country.overall_score)).or_insert(0) += 1;
        counts
    })
}

/// Writes leaderboard rows as CSV: rank, identity, overall score and tier,
/// then one column per metric in the fixed ordering.
pub fn write_leaderboard_csv<W: Write>(rows: &[RankedCountry], writer: W) -> Result<(), csv::Error> {
    let countries: Vec<Country> = rows.iter().map(|row| row.country.clone()).collect();
    let keys = metric_keys_of(&countries);
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec!["rank", "id", "name", "region", "overall_score", "tier"];
    header.extend(keys.iter().map(|key| key.as_str()));
    csv_writer.write_record(&header)?;

    for row in rows {
        let mut record = vec![
            row.rank.to_string(),
            row.id.clone(),
            row.name.clone(),
            row.region.label().to_string(),
            format!("{:.1}", row.overall_score),
            row.overall_tier().label().to_string(),
        ];
        record.extend(keys.iter().map(|key| format!("{:.1}", row.metric_score(*key))));
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

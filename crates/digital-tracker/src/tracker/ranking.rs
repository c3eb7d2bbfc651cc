use super::domain::{Country, RankedCountry};
use super::scoring::{compare_desc, compare_names, strong_metric_count, total_metric_score};
use std::cmp::Ordering;

/// Global tie-break chain: overall score, total metric score, count of
/// strong metrics (all descending), then name ascending.
pub(crate) fn compare_overall(a: &Country, b: &Country) -> Ordering {
    compare_desc(a.overall_score, b.overall_score)
        .then_with(|| compare_desc(total_metric_score(a), total_metric_score(b)))
        .then_with(|| strong_metric_count(b).cmp(&strong_metric_count(a)))
        .then_with(|| compare_names(&a.name, &b.name))
}

/// Orders a copy of `countries` by the global tie-break chain and assigns
/// ranks `1..=N` by position.
pub fn assign_ranks<C>(countries: &[C]) -> Vec<RankedCountry>
where
    C: AsRef<Country>,
{
    let mut sorted: Vec<&Country> = countries.iter().map(AsRef::as_ref).collect();
    sorted.sort_by(|a, b| compare_overall(a, b));

    sorted
        .into_iter()
        .enumerate()
        .map(|(index, country)| RankedCountry {
            country: country.clone(),
            rank: index + 1,
        })
        .collect()
}

/// First country under the global tie-break chain.
pub(crate) fn top_ranked<'a, I>(countries: I) -> Option<&'a Country>
where
    I: IntoIterator<Item = &'a Country>,
{
    countries
        .into_iter()
        .min_by(|a, b| compare_overall(a, b))
}

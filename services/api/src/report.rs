use crate::infra::{
    load_dataset, parse_region, parse_sort_column, parse_sort_direction, parse_tier,
    resolve_data_path,
};
use chrono::NaiveDate;
use clap::Args;
use digital_tracker::config::AppConfig;
use digital_tracker::error::AppError;
use digital_tracker::tracker::comparison::parse_country_ids;
use digital_tracker::tracker::leaderboard::{
    get_leaderboard_data, write_leaderboard_csv, LeaderboardFilters, RegionFilter, SortColumn,
    SortDirection, SortState, TierFilter,
};
use digital_tracker::tracker::{
    AnalyticsConfig, ComparisonSelection, ComparisonSummary, CountryProfile, DashboardSummary,
    RankedCountry, Region, ScoreTier, TrackerData,
};
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct DataArgs {
    /// Tracker dataset JSON to read instead of the bundled one
    #[arg(long)]
    pub(crate) data: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct LeaderboardArgs {
    /// Only show one region (label or slug, e.g. asia-pacific)
    #[arg(long, value_parser = parse_region)]
    pub(crate) region: Option<Region>,
    /// Only show one tier (strong|moderate|low or High|Medium|Low)
    #[arg(long, value_parser = parse_tier)]
    pub(crate) tier: Option<ScoreTier>,
    /// Sort column: name, overall or a metric key
    #[arg(long, value_parser = parse_sort_column)]
    pub(crate) sort: Option<SortColumn>,
    /// Sort direction; defaults to desc when --sort is given
    #[arg(long, value_parser = parse_sort_direction)]
    pub(crate) dir: Option<SortDirection>,
    /// Emit CSV instead of a text table
    #[arg(long)]
    pub(crate) csv: bool,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

#[derive(Args, Debug)]
pub(crate) struct CountryArgs {
    /// Three-letter country id, e.g. EST
    pub(crate) id: String,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    /// Comma-separated country ids, e.g. EST,SGP
    pub(crate) ids: String,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

#[derive(Args, Debug)]
pub(crate) struct InsightsArgs {
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

impl LeaderboardArgs {
    fn filters(&self) -> LeaderboardFilters {
        LeaderboardFilters {
            region: self.region.map(RegionFilter::Only).unwrap_or_default(),
            tier: self.tier.map(TierFilter::Only).unwrap_or_default(),
        }
    }

    fn sort_state(&self) -> SortState {
        match self.sort {
            Some(column) => SortState::new(column, self.dir.unwrap_or(SortDirection::Descending)),
            None => SortState::default(),
        }
    }
}

fn load(args: DataArgs) -> Result<(TrackerData, AnalyticsConfig), AppError> {
    let config = AppConfig::load()?;
    let path = resolve_data_path(args.data, &config.tracker);
    let data = load_dataset(path.as_deref())?;
    Ok((data, config.tracker.analytics()))
}

pub(crate) fn run_leaderboard(args: LeaderboardArgs) -> Result<(), AppError> {
    let filters = args.filters();
    let sort = args.sort_state();
    let csv = args.csv;
    let (data, _) = load(args.data)?;

    let rows = get_leaderboard_data(&data.countries, &filters, &sort);
    if csv {
        let stdout = std::io::stdout();
        write_leaderboard_csv(&rows, stdout.lock())?;
    } else {
        print!("{}", render_leaderboard(&data, &rows));
    }
    Ok(())
}

pub(crate) fn run_country(args: CountryArgs) -> Result<(), AppError> {
    let (data, _) = load(args.data)?;
    let profile = CountryProfile::build(&data.countries, &args.id)
        .ok_or_else(|| AppError::NotFound(args.id.clone()))?;
    print!("{}", render_profile(&profile));
    Ok(())
}

pub(crate) fn run_compare(args: CompareArgs) -> Result<(), AppError> {
    let (data, _) = load(args.data)?;
    let ids = parse_country_ids(&args.ids);
    let selection = ComparisonSelection::resolve(&data.countries, &ids)?;
    for unknown in &selection.unknown_ids {
        println!("Skipping unknown country id {unknown}");
    }

    let summary = ComparisonSummary::build(&selection.countries);
    print!("{}", render_comparison(&selection, &summary));
    Ok(())
}

pub(crate) fn run_insights(args: InsightsArgs) -> Result<(), AppError> {
    let (data, analytics) = load(args.data)?;
    let summary = DashboardSummary::build(&data.countries, &analytics);
    print!("{}", render_insights(&data, &summary));
    Ok(())
}

fn format_updated(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

pub(crate) fn render_leaderboard(data: &TrackerData, rows: &[RankedCountry]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Digital infrastructure leaderboard ({} of {} countries, data as of {})",
        rows.len(),
        data.countries.len(),
        format_updated(data.metadata.last_updated)
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:>3}. {:<24} {:<22} {:>4.1}  {}",
            row.rank,
            row.name,
            row.region.label(),
            row.overall_score,
            row.overall_tier().label()
        );
    }
    if rows.is_empty() {
        let _ = writeln!(out, "No countries match the selected filters.");
    }
    out
}

pub(crate) fn render_profile(profile: &CountryProfile) -> String {
    let mut out = String::new();
    let country = &profile.country;
    let _ = writeln!(
        out,
        "{} ({}) - {}",
        country.name,
        country.id,
        country.region.label()
    );
    let _ = writeln!(
        out,
        "Rank #{} of {} | overall {:.1} | {}",
        profile.rank, profile.total_countries, country.overall_score, profile.tier_label
    );

    for section in &profile.sections {
        let _ = writeln!(out, "\n{} (avg {:.1})", section.title, section.average_score);
        for metric in &section.metrics {
            let rank = metric
                .metric_rank
                .map(|rank| format!("#{rank}"))
                .unwrap_or_else(|| "-".to_string());
            let _ = writeln!(
                out,
                "  - {:<34} {:>4.1}  {:<15} {:>4}",
                metric.display_name, metric.score, metric.tier_label, rank
            );
            if !metric.summary.is_empty() {
                let _ = writeln!(out, "      {}", metric.summary);
            }
        }
    }
    out
}

pub(crate) fn render_comparison(
    selection: &ComparisonSelection,
    summary: &ComparisonSummary,
) -> String {
    let mut out = String::new();
    let names: Vec<&str> = selection
        .countries
        .iter()
        .map(|country| country.name.as_str())
        .collect();
    let _ = writeln!(out, "Comparing {}", names.join(" vs "));

    for row in &summary.rows {
        let cells: Vec<String> = row
            .cells
            .iter()
            .map(|cell| format!("{} {:.1}", cell.country_id, cell.score))
            .collect();
        let marker = if row.divergent { " *" } else { "" };
        let _ = writeln!(out, "  {:<34} {}{}", row.display_name, cells.join(" | "), marker);
    }

    let _ = writeln!(out, "\n{}", summary.insight.text());
    out
}

pub(crate) fn render_insights(data: &TrackerData, summary: &DashboardSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Tracker insights for {} countries (data as of {})",
        summary.counts.total,
        format_updated(data.metadata.last_updated)
    );
    let _ = writeln!(
        out,
        "- {}: {} | {}: {} | {}: {}",
        ScoreTier::Strong.label(),
        summary.counts.strong,
        ScoreTier::Moderate.label(),
        summary.counts.moderate,
        ScoreTier::Low.label(),
        summary.counts.low
    );

    let _ = writeln!(out, "\nSpotlight");
    for card in &summary.spotlight {
        let _ = writeln!(
            out,
            "- {}: {} ({}) - {}",
            card.category_label, card.country.name, card.label, card.description
        );
    }

    let _ = writeln!(out, "\nRegions");
    for stats in &summary.regional {
        let leader = stats
            .top_performer
            .as_ref()
            .map(|country| country.name.as_str())
            .unwrap_or("-");
        let _ = writeln!(
            out,
            "- {}: {} countries | {} high performers | avg {:.1} | top {}",
            stats.region_label,
            stats.country_count,
            stats.tier_counts.strong,
            stats.average_score,
            leader
        );
    }
    let _ = writeln!(out, "  {}", summary.regional_insight);

    let _ = writeln!(out, "\nInsights");
    for insight in &summary.insights {
        let _ = writeln!(out, "- {}: {}", insight.title, insight.description);
    }
    let _ = writeln!(out, "- {}", summary.metric_insight);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundled() -> TrackerData {
        TrackerData::bundled().expect("bundled dataset loads")
    }

    #[test]
    fn leaderboard_text_lists_filtered_rows() {
        let data = bundled();
        let args = LeaderboardArgs {
            region: Some(Region::Americas),
            tier: None,
            sort: None,
            dir: None,
            csv: false,
            data: DataArgs::default(),
        };
        let rows = get_leaderboard_data(&data.countries, &args.filters(), &args.sort_state());
        let text = render_leaderboard(&data, &rows);

        assert!(text.starts_with("Digital infrastructure leaderboard (4 of 16 countries, data as of September 30, 2025)"));
        assert!(text.contains("  1. Brazil"));
    }

    #[test]
    fn sort_defaults_to_descending() {
        let args = LeaderboardArgs {
            region: None,
            tier: None,
            sort: Some(SortColumn::Name),
            dir: None,
            csv: false,
            data: DataArgs::default(),
        };
        assert_eq!(
            args.sort_state(),
            SortState::new(SortColumn::Name, SortDirection::Descending)
        );
    }

    #[test]
    fn profile_text_shows_rank_and_pillars() {
        let data = bundled();
        let profile = CountryProfile::build(&data.countries, "EST").expect("estonia");
        let text = render_profile(&profile);

        assert!(text.starts_with("Estonia (EST) - Europe"));
        assert!(text.contains("Rank #1 of 16"));
        assert!(text.contains("Digital Government (avg"));
    }

    #[test]
    fn comparison_text_ends_with_insight() {
        let data = bundled();
        let selection =
            ComparisonSelection::resolve(&data.countries, &parse_country_ids("EST,ETH"))
                .expect("within cap");
        let summary = ComparisonSummary::build(&selection.countries);
        let text = render_comparison(&selection, &summary);

        assert!(text.starts_with("Comparing Estonia vs Ethiopia"));
        assert!(text.trim_end().ends_with(summary.insight.text()));
    }

    #[test]
    fn insights_text_covers_spotlight_and_regions() {
        let data = bundled();
        let summary = DashboardSummary::build(&data.countries, &AnalyticsConfig::default());
        let text = render_insights(&data, &summary);

        assert!(text.contains("- The Leader: Estonia"));
        assert!(text.contains("- Rising Potential: United States"));
        assert!(text.contains("- Regional Pioneer: Singapore (Asia-Pacific Leader)"));
        assert!(text.contains("- Europe: 5 countries | 3 high performers"));
    }
}

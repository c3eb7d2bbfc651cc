use digital_tracker::config::TrackerConfig;
use digital_tracker::error::AppError;
use digital_tracker::tracker::leaderboard::{SortColumn, SortDirection};
use digital_tracker::tracker::{AnalyticsConfig, Region, ScoreTier, TrackerData};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) data: Arc<TrackerData>,
    pub(crate) analytics: AnalyticsConfig,
}

/// Command-line path wins over `TRACKER_DATA_PATH`; neither means bundled.
pub(crate) fn resolve_data_path(flag: Option<PathBuf>, config: &TrackerConfig) -> Option<PathBuf> {
    flag.or_else(|| config.data_path.clone())
}

pub(crate) fn load_dataset(path: Option<&Path>) -> Result<TrackerData, AppError> {
    let data = match path {
        Some(path) => {
            info!(path = %path.display(), "loading tracker dataset from file");
            TrackerData::from_path(path)?
        }
        None => TrackerData::bundled()?,
    };
    Ok(data)
}

pub(crate) fn parse_region(raw: &str) -> Result<Region, String> {
    Region::parse(raw).ok_or_else(|| {
        let known: Vec<&str> = Region::ordered().iter().map(|region| region.slug()).collect();
        format!("unknown region '{raw}' (expected one of {})", known.join(", "))
    })
}

pub(crate) fn parse_tier(raw: &str) -> Result<ScoreTier, String> {
    ScoreTier::parse(raw)
        .ok_or_else(|| format!("unknown tier '{raw}' (expected strong, moderate or low)"))
}

pub(crate) fn parse_sort_column(raw: &str) -> Result<SortColumn, String> {
    SortColumn::parse(raw)
        .ok_or_else(|| format!("unknown sort column '{raw}' (expected name, overall or a metric key)"))
}

pub(crate) fn parse_sort_direction(raw: &str) -> Result<SortDirection, String> {
    SortDirection::parse(raw).ok_or_else(|| format!("unknown sort direction '{raw}' (expected asc or desc)"))
}

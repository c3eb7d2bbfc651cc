use crate::infra::AppState;
use axum::extract::{Path, Query};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use digital_tracker::error::AppError;
use digital_tracker::tracker::comparison::{build_compare_path, parse_country_ids};
use digital_tracker::tracker::dataset::flag_url;
use digital_tracker::tracker::leaderboard::{
    get_leaderboard_data, write_leaderboard_csv, LeaderboardFilters, SortState,
};
use digital_tracker::tracker::metric_ranking::{compute_all_metric_rankings, CountryMetricRanks};
use digital_tracker::tracker::{
    ComparisonSelection, ComparisonSummary, CountryProfile, DashboardSummary, RankedCountry,
    Region, ScoreTier,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LeaderboardQuery {
    #[serde(default)]
    pub(crate) region: Option<String>,
    #[serde(default)]
    pub(crate) tier: Option<String>,
    #[serde(default)]
    pub(crate) sort: Option<String>,
    #[serde(default)]
    pub(crate) dir: Option<String>,
}

impl LeaderboardQuery {
    fn filters(&self) -> LeaderboardFilters {
        LeaderboardFilters::from_query(self.region.as_deref(), self.tier.as_deref())
    }

    fn sort_state(&self) -> SortState {
        SortState::from_query(self.sort.as_deref(), self.dir.as_deref())
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LeaderboardResponse {
    pub(crate) total_countries: usize,
    pub(crate) visible: usize,
    pub(crate) filters: LeaderboardFilters,
    pub(crate) sort: SortState,
    pub(crate) filters_active: bool,
    pub(crate) rows: Vec<RankedCountry>,
}

#[derive(Debug, Serialize)]
pub(crate) struct MetricRanksResponse {
    pub(crate) country_id: String,
    pub(crate) total_countries: usize,
    pub(crate) ranks: CountryMetricRanks,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchQuery {
    #[serde(default)]
    pub(crate) q: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchHit {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) region: Region,
    pub(crate) overall_score: f64,
    pub(crate) tier: ScoreTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) flag_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CompareQuery {
    #[serde(default)]
    pub(crate) countries: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CompareResponse {
    #[serde(flatten)]
    pub(crate) summary: ComparisonSummary,
    pub(crate) unknown_ids: Vec<String>,
    pub(crate) path: String,
}

pub(crate) fn tracker_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/leaderboard", get(leaderboard_endpoint))
        .route("/api/v1/leaderboard.csv", get(leaderboard_csv_endpoint))
        .route("/api/v1/countries/:id", get(country_endpoint))
        .route(
            "/api/v1/countries/:id/metric-ranks",
            get(metric_ranks_endpoint),
        )
        .route("/api/v1/search", get(search_endpoint))
        .route("/api/v1/insights", get(insights_endpoint))
        .route("/api/v1/compare", get(compare_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({
            "status": "ready",
            "dataset_version": state.data.metadata.version,
            "countries": state.data.countries.len(),
        })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn leaderboard_endpoint(
    Extension(state): Extension<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Json<LeaderboardResponse> {
    let filters = query.filters();
    let sort = query.sort_state();
    let rows = get_leaderboard_data(&state.data.countries, &filters, &sort);
    info!(visible = rows.len(), "leaderboard requested");

    Json(LeaderboardResponse {
        total_countries: state.data.countries.len(),
        visible: rows.len(),
        filters_active: filters.has_active_filters(&sort),
        filters,
        sort,
        rows,
    })
}

pub(crate) async fn leaderboard_csv_endpoint(
    Extension(state): Extension<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<impl IntoResponse, AppError> {
    let rows = get_leaderboard_data(&state.data.countries, &query.filters(), &query.sort_state());
    let mut buffer = Vec::new();
    write_leaderboard_csv(&rows, &mut buffer)?;
    info!(rows = rows.len(), "leaderboard csv exported");

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        buffer,
    ))
}

pub(crate) async fn country_endpoint(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CountryProfile>, AppError> {
    let profile =
        CountryProfile::build(&state.data.countries, &id).ok_or(AppError::NotFound(id))?;
    info!(country = %profile.country.id, "country profile requested");
    Ok(Json(profile))
}

pub(crate) async fn metric_ranks_endpoint(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MetricRanksResponse>, AppError> {
    let country = state
        .data
        .country_by_id(&id)
        .ok_or_else(|| AppError::NotFound(id.clone()))?;
    let rankings = compute_all_metric_rankings(&state.data.countries);
    let ranks = rankings
        .for_country(&country.id)
        .cloned()
        .unwrap_or_default();

    Ok(Json(MetricRanksResponse {
        country_id: country.id.clone(),
        total_countries: state.data.countries.len(),
        ranks,
    }))
}

pub(crate) async fn search_endpoint(
    Extension(state): Extension<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<SearchHit>> {
    let hits = state
        .data
        .search(&query.q)
        .into_iter()
        .map(|country| SearchHit {
            id: country.id.clone(),
            name: country.name.clone(),
            region: country.region,
            overall_score: country.overall_score,
            tier: country.overall_tier(),
            flag_url: flag_url(country),
        })
        .collect();
    Json(hits)
}

pub(crate) async fn insights_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<DashboardSummary> {
    Json(DashboardSummary::build(&state.data.countries, &state.analytics))
}

pub(crate) async fn compare_endpoint(
    Extension(state): Extension<AppState>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<CompareResponse>, AppError> {
    let ids = parse_country_ids(&query.countries);
    let selection = ComparisonSelection::resolve(&state.data.countries, &ids)?;
    info!(
        selected = selection.countries.len(),
        unknown = selection.unknown_ids.len(),
        "comparison requested"
    );

    let resolved: Vec<String> = selection
        .countries
        .iter()
        .map(|country| country.id.clone())
        .collect();

    Ok(Json(CompareResponse {
        summary: ComparisonSummary::build(&selection.countries),
        path: build_compare_path(&resolved),
        unknown_ids: selection.unknown_ids,
    }))
}

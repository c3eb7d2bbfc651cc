use crate::cli::ServeArgs;
use crate::infra::{load_dataset, resolve_data_path, AppState};
use crate::routes::tracker_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use digital_tracker::config::AppConfig;
use digital_tracker::error::AppError;
use digital_tracker::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    config.tracker.data_path = resolve_data_path(args.data.take(), &config.tracker);

    telemetry::init(&config.telemetry)?;

    let data = load_dataset(config.tracker.data_path.as_deref())?;
    info!(
        version = %data.metadata.version,
        countries = data.countries.len(),
        reference_region = config.tracker.reference_region.label(),
        "tracker dataset ready"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        data: Arc::new(data),
        analytics: config.tracker.analytics(),
    };

    let app = tracker_routes()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "digital tracker service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

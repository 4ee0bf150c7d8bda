use crate::cli::ServeArgs;
use crate::demo::sample_listings;
use crate::infra::{AppServices, AppState};
use crate::routes::api_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use care_navigator::config::AppConfig;
use care_navigator::error::AppError;
use care_navigator::telemetry;
use care_navigator::workflows::directory::DirectoryImporter;
use chrono::Utc;
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let services = AppServices::in_memory(&config.navigator);
    let (listings, source) = match &config.navigator.directory_csv {
        Some(path) => (
            DirectoryImporter::from_path(path, Utc::now())?,
            path.display().to_string(),
        ),
        None => (sample_listings(), "built-in sample".to_string()),
    };
    let seeded = services.directory_store.seed(listings)?;
    info!(listings = seeded, %source, "directory seeded");

    let app = api_router(&services)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        service_area = %config.navigator.service_area,
        "care navigator ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

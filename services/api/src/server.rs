use crate::cli::ServeArgs;
use crate::infra::{load_records_from_path, AppState};
use crate::routes::with_report_routes;
use assessment_report::config::AppConfig;
use assessment_report::error::AppError;
use assessment_report::reports::{ReportCatalog, ReportService};
use assessment_report::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
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

    let catalog = ReportCatalog::from_path(&config.sources.catalog_path)?;
    let records = load_records_from_path(&config.sources.records_path)?;
    info!(
        catalog = %config.sources.catalog_path.display(),
        assessment_types = catalog.len(),
        sessions = records.len()?,
        "report sources loaded"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = Arc::new(ReportService::new(Arc::new(records), Arc::new(catalog)));

    let app = with_report_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "assessment report service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

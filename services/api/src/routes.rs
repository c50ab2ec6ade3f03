use crate::infra::{AppState, InMemoryRecordRepository};
use crate::render::render_html;
use assessment_report::error::AppError;
use assessment_report::reports::{report_router, ReportCatalog, ReportService};
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Extension, Json};
use chrono::Local;
use serde_json::json;
use std::sync::Arc;

pub(crate) type SharedReportService = Arc<ReportService<InMemoryRecordRepository, ReportCatalog>>;

pub(crate) fn with_report_routes(service: SharedReportService) -> axum::Router {
    report_router(service.clone())
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/reports/:session_id/html", get(report_html_endpoint))
        .layer(Extension(service))
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
        json!({ "status": "ready" })
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

pub(crate) async fn report_html_endpoint(
    Extension(service): Extension<SharedReportService>,
    Path(session_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let document = service.generate(&session_id)?;
    Ok(Html(render_html(&document, Local::now())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::load_records;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::io::Cursor;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    const CATALOG: &str = r#"{
        "intake": {
            "sections": [
                {
                    "title": "Scores",
                    "fields": [
                        { "label": "Total", "mapping": { "type": "path", "path": "scores.total" }, "classifyKey": "total" }
                    ]
                }
            ],
            "classifications": { "total": [ { "min": 0, "max": 50, "label": "Low" }, { "min": 50, "max": 101, "label": "High" } ] }
        }
    }"#;

    const RECORDS: &str = r#"[
        { "session_id": "s-1", "assessment_id": "intake", "scores": { "total": 64 } }
    ]"#;

    fn router(ready: bool) -> axum::Router {
        let records = load_records(Cursor::new(RECORDS)).expect("records load");
        let catalog = ReportCatalog::from_json_str(CATALOG).expect("catalog parses");
        let service = Arc::new(ReportService::new(Arc::new(records), Arc::new(catalog)));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_report_routes(service).layer(Extension(state))
    }

    async fn fetch(router: axum::Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        (status, String::from_utf8(bytes.to_vec()).expect("utf-8 body"))
    }

    #[tokio::test]
    async fn html_route_renders_classified_values() {
        let (status, body) = fetch(router(true), "/api/v1/reports/s-1/html").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>Report - intake</h1>"));
        assert!(body.contains(r#"<span class="value">64 (High)</span>"#));
    }

    #[tokio::test]
    async fn html_route_returns_not_found_for_unknown_session() {
        let (status, body) = fetch(router(true), "/api/v1/reports/s-404/html").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("session not found"));
    }

    #[tokio::test]
    async fn json_route_is_mounted_alongside_probes() {
        let (status, body) = fetch(router(true), "/api/v1/reports/s-1").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("64 (High)"));

        let (status, _) = fetch(router(true), "/health").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn readiness_reflects_startup_flag() {
        let (status, body) = fetch(router(false), "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body.contains("initializing"));

        let (status, _) = fetch(router(true), "/ready").await;
        assert_eq!(status, StatusCode::OK);
    }
}

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::assessment::AssessmentConfigStore;
use super::repository::RecordRepository;
use super::service::{ReportService, ReportServiceError};

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateReportQuery {
    #[serde(default)]
    session_id: Option<String>,
}

/// Router builder exposing report generation as JSON.
pub fn report_router<R, C>(service: Arc<ReportService<R, C>>) -> Router
where
    R: RecordRepository + 'static,
    C: AssessmentConfigStore + 'static,
{
    Router::new()
        .route("/api/v1/reports/:session_id", get(report_handler::<R, C>))
        .route("/api/v1/generate-report", get(generate_handler::<R, C>))
        .with_state(service)
}

pub(crate) async fn report_handler<R, C>(
    State(service): State<Arc<ReportService<R, C>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: RecordRepository + 'static,
    C: AssessmentConfigStore + 'static,
{
    respond(&service, &session_id)
}

pub(crate) async fn generate_handler<R, C>(
    State(service): State<Arc<ReportService<R, C>>>,
    Query(query): Query<GenerateReportQuery>,
) -> Response
where
    R: RecordRepository + 'static,
    C: AssessmentConfigStore + 'static,
{
    match query.session_id.filter(|id| !id.is_empty()) {
        Some(session_id) => respond(&service, &session_id),
        None => {
            let payload = json!({ "error": "session_id required" });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
    }
}

fn respond<R, C>(service: &ReportService<R, C>, session_id: &str) -> Response
where
    R: RecordRepository + 'static,
    C: AssessmentConfigStore + 'static,
{
    match service.generate(session_id) {
        Ok(document) => (StatusCode::OK, axum::Json(document)).into_response(),
        Err(ReportServiceError::SessionNotFound(_)) => {
            let payload = json!({ "error": "session not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

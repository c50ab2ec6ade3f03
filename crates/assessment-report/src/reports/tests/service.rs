use std::sync::Arc;

use super::common::*;
use crate::reports::repository::{RecordRepository, RepositoryError, SessionRecord};
use crate::reports::service::{ReportService, ReportServiceError};
use serde_json::json;

#[test]
fn generate_assembles_stored_session() {
    let service = report_service(vec![intake_record()]);

    let document = service.generate("sess-001").expect("report generates");

    assert_eq!(document.header.assessment_id, "cognitive-v1");
    assert_eq!(document.sections.len(), 3);
    assert_eq!(document.field_count(), 5);
}

#[test]
fn generate_reports_unknown_session() {
    let service = report_service(vec![intake_record()]);

    match service.generate("sess-404") {
        Err(ReportServiceError::SessionNotFound(id)) => assert_eq!(id, "sess-404"),
        other => panic!("expected session not found, got {other:?}"),
    }
}

#[test]
fn generate_surfaces_store_failures() {
    let service = ReportService::new(
        Arc::new(FakeRecordRepository::unavailable()),
        Arc::new(catalog()),
    );

    match service.generate("sess-001") {
        Err(ReportServiceError::Repository(RepositoryError::Unavailable(_))) => {}
        other => panic!("expected repository failure, got {other:?}"),
    }
}

#[test]
fn records_are_keyed_by_session_id() {
    let repository = FakeRecordRepository::default();

    repository.put(intake_record()).expect("record stores");

    assert!(repository.exists("sess-001").expect("lookup succeeds"));
    assert!(!repository.exists("sess-002").expect("lookup succeeds"));
    match repository.put(SessionRecord::new(json!({ "assessment_id": "x" }))) {
        Err(RepositoryError::MissingSessionId) => {}
        other => panic!("expected missing session id, got {other:?}"),
    }
}

#[test]
fn numeric_session_ids_are_stringified() {
    let record = SessionRecord::new(json!({ "session_id": 42, "assessment_id": "cognitive-v1" }));
    assert_eq!(record.session_id().as_deref(), Some("42"));

    let service = report_service(vec![record]);
    let document = service.generate("42").expect("report generates");
    assert_eq!(document.header.session_id, "42");
}

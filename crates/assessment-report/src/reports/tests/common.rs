use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::reports::assessment::{AssessmentConfig, FieldSpec, ReportCatalog, SectionSpec};
use crate::reports::classify::ClassificationRange;
use crate::reports::mapping::MappingSpec;
use crate::reports::repository::{RecordRepository, RepositoryError, SessionRecord};
use crate::reports::service::ReportService;

pub(super) fn score_ranges() -> Vec<ClassificationRange> {
    vec![
        ClassificationRange::new(0.0, 60.0, "Low"),
        ClassificationRange::new(60.0, 80.0, "Mid"),
        ClassificationRange::new(80.0, 101.0, "High"),
    ]
}

pub(super) fn intake_record() -> SessionRecord {
    SessionRecord::new(json!({
        "session_id": "sess-001",
        "assessment_id": "cognitive-v1",
        "participant": { "name": "Avery Lind", "age": 34 },
        "scores": [
            { "domain": "memory", "score": 75 },
            { "domain": "attention", "score": "82.5" }
        ],
        "items": [
            { "id": 1, "response": "agree", "latency_ms": 840 },
            { "id": "2", "response": "neutral", "latency_ms": 1210 }
        ],
        "notes": null
    }))
}

pub(super) fn cognitive_config() -> AssessmentConfig {
    let mut classifications = BTreeMap::new();
    classifications.insert("score".to_string(), score_ranges());

    AssessmentConfig {
        sections: vec![
            SectionSpec {
                title: "Participant".to_string(),
                fields: vec![
                    FieldSpec::new("Name", MappingSpec::path("participant.name")),
                    FieldSpec::new("Age", MappingSpec::path("participant.age")),
                ],
            },
            SectionSpec {
                title: "Scores".to_string(),
                fields: vec![
                    FieldSpec::new("Memory", MappingSpec::path("scores.0.score"))
                        .classified_by("score"),
                    FieldSpec::new(
                        "Attention",
                        MappingSpec::find("scores", "domain", "attention", Some("score")),
                    )
                    .classified_by("score"),
                    FieldSpec::new("Notes", MappingSpec::path("notes")).classified_by("score"),
                ],
            },
            SectionSpec {
                title: "Clinician Remarks".to_string(),
                fields: Vec::new(),
            },
        ],
        classifications,
    }
}

pub(super) fn fallback_config() -> AssessmentConfig {
    AssessmentConfig {
        sections: vec![SectionSpec {
            title: "Session".to_string(),
            fields: vec![FieldSpec::new("Session ID", MappingSpec::path("session_id"))],
        }],
        classifications: BTreeMap::new(),
    }
}

pub(super) fn catalog() -> ReportCatalog {
    let mut assessments = BTreeMap::new();
    assessments.insert("cognitive-v1".to_string(), cognitive_config());
    assessments.insert("default".to_string(), fallback_config());
    ReportCatalog::new(assessments)
}

#[derive(Default)]
pub(super) struct FakeRecordRepository {
    records: Mutex<HashMap<String, SessionRecord>>,
    unavailable: bool,
}

impl FakeRecordRepository {
    pub(super) fn with_records(records: Vec<SessionRecord>) -> Self {
        let repository = Self::default();
        for record in records {
            repository.put(record).expect("fixture record stores");
        }
        repository
    }

    pub(super) fn unavailable() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            unavailable: true,
        }
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.unavailable {
            Err(RepositoryError::Unavailable("fake store offline".to_string()))
        } else {
            Ok(())
        }
    }
}

impl RecordRepository for FakeRecordRepository {
    fn get(&self, session_id: &str) -> Result<Option<SessionRecord>, RepositoryError> {
        self.check()?;
        let guard = self.records.lock().expect("fake repository mutex poisoned");
        Ok(guard.get(session_id).cloned())
    }

    fn put(&self, record: SessionRecord) -> Result<(), RepositoryError> {
        self.check()?;
        let session_id = record.session_id().ok_or(RepositoryError::MissingSessionId)?;
        let mut guard = self.records.lock().expect("fake repository mutex poisoned");
        guard.insert(session_id, record);
        Ok(())
    }

    fn exists(&self, session_id: &str) -> Result<bool, RepositoryError> {
        self.check()?;
        let guard = self.records.lock().expect("fake repository mutex poisoned");
        Ok(guard.contains_key(session_id))
    }
}

pub(super) fn report_service(
    records: Vec<SessionRecord>,
) -> Arc<ReportService<FakeRecordRepository, ReportCatalog>> {
    Arc::new(ReportService::new(
        Arc::new(FakeRecordRepository::with_records(records)),
        Arc::new(catalog()),
    ))
}

pub(super) async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
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
    let body = serde_json::from_slice(&bytes).expect("body is json");
    (status, body)
}

use assessment_report::error::AppError;
use assessment_report::reports::{RecordRepository, RepositoryError, SessionRecord};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock};
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local record store keyed by session id.
#[derive(Debug, Default, Clone)]
pub(crate) struct InMemoryRecordRepository {
    records: Arc<RwLock<HashMap<String, SessionRecord>>>,
}

impl RecordRepository for InMemoryRecordRepository {
    fn get(&self, session_id: &str) -> Result<Option<SessionRecord>, RepositoryError> {
        let guard = self
            .records
            .read()
            .map_err(|_| RepositoryError::Unavailable("record lock poisoned".to_string()))?;
        Ok(guard.get(session_id).cloned())
    }

    fn put(&self, record: SessionRecord) -> Result<(), RepositoryError> {
        let session_id = record.session_id().ok_or(RepositoryError::MissingSessionId)?;
        let mut guard = self
            .records
            .write()
            .map_err(|_| RepositoryError::Unavailable("record lock poisoned".to_string()))?;
        guard.insert(session_id, record);
        Ok(())
    }

    fn exists(&self, session_id: &str) -> Result<bool, RepositoryError> {
        let guard = self
            .records
            .read()
            .map_err(|_| RepositoryError::Unavailable("record lock poisoned".to_string()))?;
        Ok(guard.contains_key(session_id))
    }
}

impl InMemoryRecordRepository {
    pub(crate) fn len(&self) -> Result<usize, RepositoryError> {
        let guard = self
            .records
            .read()
            .map_err(|_| RepositoryError::Unavailable("record lock poisoned".to_string()))?;
        Ok(guard.len())
    }
}

/// Loads a JSON array of session records. The first record for a session id
/// wins; records without one are skipped.
pub(crate) fn load_records<R: Read>(reader: R) -> Result<InMemoryRecordRepository, AppError> {
    let records: Vec<SessionRecord> = serde_json::from_reader(reader)?;
    let repository = InMemoryRecordRepository::default();

    for (position, record) in records.into_iter().enumerate() {
        let Some(session_id) = record.session_id() else {
            warn!(position, "skipping session record without session_id");
            continue;
        };
        if repository.exists(&session_id)? {
            warn!(%session_id, position, "skipping duplicate session record");
            continue;
        }
        repository.put(record)?;
    }

    Ok(repository)
}

pub(crate) fn load_records_from_path(
    path: impl AsRef<Path>,
) -> Result<InMemoryRecordRepository, AppError> {
    let file = File::open(path)?;
    load_records(BufReader::new(file))
}

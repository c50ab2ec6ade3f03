use std::sync::Arc;

use tracing::info;

use super::assemble::assemble_from_store;
use super::assessment::AssessmentConfigStore;
use super::document::ReportDocument;
use super::repository::{RecordRepository, RepositoryError};

/// Service composing the record source and the assessment catalog.
pub struct ReportService<R, C> {
    records: Arc<R>,
    catalog: Arc<C>,
}

impl<R, C> ReportService<R, C>
where
    R: RecordRepository + 'static,
    C: AssessmentConfigStore + 'static,
{
    pub fn new(records: Arc<R>, catalog: Arc<C>) -> Self {
        Self { records, catalog }
    }

    /// Assemble the report for a captured session.
    pub fn generate(&self, session_id: &str) -> Result<ReportDocument, ReportServiceError> {
        let record = self
            .records
            .get(session_id)?
            .ok_or_else(|| ReportServiceError::SessionNotFound(session_id.to_string()))?;

        let document = assemble_from_store(&record, self.catalog.as_ref());
        info!(
            session_id,
            assessment_id = %document.header.assessment_id,
            sections = document.sections.len(),
            fields = document.field_count(),
            "report assembled"
        );
        Ok(document)
    }
}

/// Error raised by the report service.
#[derive(Debug, thiserror::Error)]
pub enum ReportServiceError {
    #[error("session not found: {0}")]
    SessionNotFound(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

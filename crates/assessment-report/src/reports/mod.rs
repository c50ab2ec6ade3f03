//! Record-to-report pipeline: declarative field mappings, range
//! classification, and section assembly.

pub mod assemble;
pub mod assessment;
pub mod classify;
pub mod coerce;
pub mod document;
pub mod mapping;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use assemble::{assemble, assemble_from_store, resolve_field};
pub use assessment::{
    AssessmentConfig, AssessmentConfigStore, CatalogError, ClassificationTables, FieldSpec,
    ReportCatalog, SectionSpec, DEFAULT_ASSESSMENT,
};
pub use classify::{classify, ClassificationRange};
pub use document::{ReportDocument, ReportHeader, ReportSection, ResolvedField};
pub use mapping::{resolve, FieldPath, MappingSpec, PathSegment};
pub use repository::{RecordRepository, RepositoryError, SessionRecord};
pub use router::report_router;
pub use service::{ReportService, ReportServiceError};

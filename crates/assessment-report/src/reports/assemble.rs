use serde_json::Value;
use tracing::debug;

use super::assessment::{
    AssessmentConfig, AssessmentConfigStore, ClassificationTables, FieldSpec, DEFAULT_ASSESSMENT,
};
use super::classify::classify;
use super::coerce::display_value;
use super::document::{ReportDocument, ReportHeader, ReportSection, ResolvedField};
use super::mapping::resolve;
use super::repository::SessionRecord;

/// Resolves one field and appends its classification label, if any.
pub fn resolve_field(
    record: &Value,
    field: &FieldSpec,
    classifications: &ClassificationTables,
) -> ResolvedField {
    let raw_value = resolve(record, &field.mapping);
    let mut display = display_value(&raw_value);

    let label = field
        .classify_key
        .as_deref()
        .and_then(|key| classifications.get(key))
        .and_then(|ranges| classify(&raw_value, ranges));
    if let Some(label) = label {
        display = format!("{display} ({label})");
    }

    ResolvedField {
        label: field.label.clone(),
        value: display,
    }
}

/// Builds the report for `record` using exactly the sections of `config`.
///
/// Every configured section is emitted, including sections without fields.
pub fn assemble(record: &SessionRecord, config: &AssessmentConfig) -> ReportDocument {
    let data = record.data();
    let sections = config
        .sections
        .iter()
        .map(|section| ReportSection {
            title: section.title.clone(),
            fields: section
                .fields
                .iter()
                .map(|field| resolve_field(data, field, &config.classifications))
                .collect(),
        })
        .collect();

    ReportDocument {
        header: header_for(record),
        sections,
    }
}

/// Picks the layout for the record's assessment type, falling back to
/// `default`, and to an empty layout when the store has neither.
pub fn assemble_from_store<S>(record: &SessionRecord, store: &S) -> ReportDocument
where
    S: AssessmentConfigStore + ?Sized,
{
    let assessment_id = record.assessment_id().unwrap_or_default();
    match store.config_for(&assessment_id) {
        Some(config) => assemble(record, config),
        None => {
            debug!(
                assessment_id = %assessment_id,
                fallback = DEFAULT_ASSESSMENT,
                "no assessment layout configured; emitting empty report"
            );
            assemble(record, &AssessmentConfig::default())
        }
    }
}

fn header_for(record: &SessionRecord) -> ReportHeader {
    ReportHeader::new(
        record.session_id().unwrap_or_default(),
        record.assessment_id().unwrap_or_default(),
    )
}

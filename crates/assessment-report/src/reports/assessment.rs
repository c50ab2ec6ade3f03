use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::classify::ClassificationRange;
use super::mapping::{lenient_mapping, MappingSpec};

/// Catalog key consulted when an assessment type has no layout of its own.
pub const DEFAULT_ASSESSMENT: &str = "default";

/// One displayable line of a report section.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    #[serde(default)]
    pub label: String,
    #[serde(default, deserialize_with = "lenient_mapping")]
    pub mapping: MappingSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classify_key: Option<String>,
}

impl FieldSpec {
    pub fn new(label: impl Into<String>, mapping: MappingSpec) -> Self {
        Self {
            label: label.into(),
            mapping,
            classify_key: None,
        }
    }

    pub fn classified_by(mut self, classify_key: impl Into<String>) -> Self {
        self.classify_key = Some(classify_key.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SectionSpec {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

/// Named classification tables keyed by `classifyKey`.
pub type ClassificationTables = BTreeMap<String, Vec<ClassificationRange>>;

/// Section layout plus classification tables for one assessment type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssessmentConfig {
    #[serde(default)]
    pub sections: Vec<SectionSpec>,
    #[serde(default)]
    pub classifications: ClassificationTables,
}

impl AssessmentConfig {
    pub fn field_count(&self) -> usize {
        self.sections.iter().map(|section| section.fields.len()).sum()
    }
}

/// Lookup contract for assessment layouts, including the `default` fallback.
pub trait AssessmentConfigStore: Send + Sync {
    fn config_for(&self, assessment_id: &str) -> Option<&AssessmentConfig>;
}

/// Error raised while loading the catalog at startup.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read assessment catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid assessment catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Immutable set of assessment layouts, loaded once per process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportCatalog {
    assessments: BTreeMap<String, AssessmentConfig>,
}

impl ReportCatalog {
    pub fn new(assessments: BTreeMap<String, AssessmentConfig>) -> Self {
        Self { assessments }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Exact lookup without the `default` fallback.
    pub fn get(&self, assessment_id: &str) -> Option<&AssessmentConfig> {
        self.assessments.get(assessment_id)
    }

    pub fn assessment_types(&self) -> impl Iterator<Item = (&str, &AssessmentConfig)> {
        self.assessments
            .iter()
            .map(|(id, config)| (id.as_str(), config))
    }

    pub fn len(&self) -> usize {
        self.assessments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assessments.is_empty()
    }
}

impl AssessmentConfigStore for ReportCatalog {
    fn config_for(&self, assessment_id: &str) -> Option<&AssessmentConfig> {
        self.get(assessment_id)
            .or_else(|| self.get(DEFAULT_ASSESSMENT))
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::coerce::display_value;

/// One subject's captured data, stored exactly as it was submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionRecord(Value);

impl SessionRecord {
    pub fn new(data: Value) -> Self {
        Self(data)
    }

    pub fn data(&self) -> &Value {
        &self.0
    }

    /// Identifier the record source keys on, read from the `session_id` field.
    pub fn session_id(&self) -> Option<String> {
        self.identifier("session_id")
    }

    /// Assessment type used to pick the report layout.
    pub fn assessment_id(&self) -> Option<String> {
        self.identifier("assessment_id")
    }

    fn identifier(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::Null => None,
            value => Some(display_value(value)),
        }
    }
}

impl From<Value> for SessionRecord {
    fn from(data: Value) -> Self {
        Self::new(data)
    }
}

/// Key lookup contract for captured records, so report generation stays storage-agnostic.
pub trait RecordRepository: Send + Sync {
    fn get(&self, session_id: &str) -> Result<Option<SessionRecord>, RepositoryError>;
    fn put(&self, record: SessionRecord) -> Result<(), RepositoryError>;
    fn exists(&self, session_id: &str) -> Result<bool, RepositoryError>;
}

/// Error enumeration for record store failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record has no session_id")]
    MissingSessionId,
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

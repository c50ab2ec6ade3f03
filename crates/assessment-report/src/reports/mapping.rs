use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;

use super::coerce::loose_string;

static INDEX_SEGMENT: OnceLock<Regex> = OnceLock::new();

fn index_segment() -> &'static Regex {
    INDEX_SEGMENT.get_or_init(|| Regex::new(r"^[0-9]+$").expect("index pattern compiles"))
}

/// One step of a dotted path.
///
/// A segment is an index purely on its spelling (`^[0-9]+$`), never on the
/// shape of the value it is applied to, so a numeric-looking key is always
/// treated as an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// `None` when the digits do not fit a `usize`; such a segment selects nothing.
    Index(Option<usize>),
    Key(String),
}

impl PathSegment {
    pub fn parse(raw: &str) -> Self {
        if index_segment().is_match(raw) {
            Self::Index(raw.parse().ok())
        } else {
            Self::Key(raw.to_string())
        }
    }

    /// Applies the segment to `current`. Indexes into a record select the key
    /// spelled by the decimal position (`"007"` selects `"7"`).
    pub fn select<'a>(&self, current: &'a Value) -> Option<&'a Value> {
        match (self, current) {
            (Self::Index(None), _) => None,
            (Self::Index(Some(position)), Value::Array(items)) => items.get(*position),
            (Self::Index(Some(position)), Value::Object(fields)) => {
                fields.get(&position.to_string())
            }
            (Self::Key(key), Value::Object(fields)) => fields.get(key),
            _ => None,
        }
    }
}

/// Parsed dotted path such as `vitals.0.heart_rate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FieldPath {
    raw: String,
    segments: Vec<PathSegment>,
}

impl FieldPath {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let segments = raw.split('.').map(PathSegment::parse).collect();
        Self { raw, segments }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Walks the segments left to right; stops at the first `null` or missing step.
    pub fn lookup<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut current = root;
        for segment in &self.segments {
            if current.is_null() {
                return None;
            }
            current = segment.select(current)?;
        }
        Some(current)
    }
}

impl From<String> for FieldPath {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for FieldPath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.raw
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Declarative instruction for pulling one value out of a record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MappingSpec {
    /// Dotted path from the record root.
    Path { path: FieldPath },
    /// First element of `array` whose `match_key` loosely equals `match_value`.
    Find {
        array: String,
        #[serde(rename = "matchKey")]
        match_key: String,
        #[serde(rename = "matchValue")]
        match_value: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<FieldPath>,
    },
    /// Mapping kinds this build does not know; they always resolve to `""`.
    #[default]
    #[serde(other)]
    Unsupported,
}

impl MappingSpec {
    pub fn path(path: impl Into<FieldPath>) -> Self {
        Self::Path { path: path.into() }
    }

    pub fn find(
        array: impl Into<String>,
        match_key: impl Into<String>,
        match_value: impl Into<Value>,
        path: Option<&str>,
    ) -> Self {
        Self::Find {
            array: array.into(),
            match_key: match_key.into(),
            match_value: match_value.into(),
            path: path.map(FieldPath::from),
        }
    }

    /// Borrowing lookup; `None` means the value is absent.
    pub fn lookup<'a>(&self, record: &'a Value) -> Option<&'a Value> {
        match self {
            Self::Path { path } => path.lookup(record),
            Self::Find {
                array,
                match_key,
                match_value,
                path,
            } => {
                let items = record.get(array)?.as_array()?;
                let expected = loose_string(match_value);
                let found = items.iter().find(|item| {
                    item.get(match_key)
                        .is_some_and(|candidate| loose_string(candidate) == expected)
                })?;

                match path {
                    Some(nested) if !nested.is_empty() => nested.lookup(found),
                    _ => Some(found),
                }
            }
            Self::Unsupported => None,
        }
    }
}

/// Reads a field's `mapping` without failing the catalog: a missing, `null`
/// or malformed mapping becomes [`MappingSpec::Unsupported`].
pub(crate) fn lenient_mapping<'de, D>(deserializer: D) -> Result<MappingSpec, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(MappingSpec::Unsupported);
    };

    Ok(MappingSpec::deserialize(&raw).unwrap_or_else(|err| {
        tracing::warn!(error = %err, mapping = %raw, "unreadable field mapping resolves to blank");
        MappingSpec::Unsupported
    }))
}

/// Resolves `mapping` against `record`, yielding `""` whenever the value is absent.
pub fn resolve(record: &Value, mapping: &MappingSpec) -> Value {
    mapping
        .lookup(record)
        .cloned()
        .unwrap_or_else(|| Value::String(String::new()))
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::coerce::numeric_value;

/// Half-open interval `[min, max)` carrying a display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRange {
    pub min: f64,
    pub max: f64,
    pub label: String,
}

impl ClassificationRange {
    pub fn new(min: f64, max: f64, label: impl Into<String>) -> Self {
        Self {
            min,
            max,
            label: label.into(),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.max
    }
}

/// Label of the first range containing `value`, in declaration order.
///
/// Overlapping ranges are legal; the earlier declaration wins and ranges are
/// never reordered. Non-numeric values are left unclassified.
pub fn classify<'a>(value: &Value, ranges: &'a [ClassificationRange]) -> Option<&'a str> {
    let reading = numeric_value(value)?;
    ranges
        .iter()
        .find(|range| range.contains(reading))
        .map(|range| range.label.as_str())
}

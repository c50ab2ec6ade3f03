use serde::{Deserialize, Serialize};

/// Fully resolved report, free of any rendering or timing concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub header: ReportHeader,
    pub sections: Vec<ReportSection>,
}

impl ReportDocument {
    pub fn field_count(&self) -> usize {
        self.sections.iter().map(|section| section.fields.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportHeader {
    pub title: String,
    pub session_id: String,
    pub assessment_id: String,
}

impl ReportHeader {
    pub fn new(session_id: impl Into<String>, assessment_id: impl Into<String>) -> Self {
        let assessment_id = assessment_id.into();
        Self {
            title: format!("Report - {assessment_id}"),
            session_id: session_id.into(),
            assessment_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    pub title: String,
    pub fields: Vec<ResolvedField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedField {
    pub label: String,
    pub value: String,
}

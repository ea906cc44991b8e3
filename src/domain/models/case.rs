use serde::{Deserialize, Serialize};

use crate::domain::errors::{require_text, ValidationError};

/// A piece of evidence attached to a case file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    pub evidence_id: String,
    /// e.g. "physical", "testimonial", "circumstantial"
    pub evidence_type: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl Evidence {
    pub fn new(
        evidence_id: impl Into<String>,
        evidence_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            evidence_id: evidence_id.into(),
            evidence_type: evidence_type.into(),
            description: description.into(),
            source_url: None,
        }
    }
}

/// Structured cold case record supplied by the case-sourcing side of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseFile {
    pub case_id: String,
    pub title: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_occurred: Option<String>,
    /// Free-form narrative of the case.
    pub raw_content: String,
    #[serde(default, alias = "evidence_list")]
    pub evidence: Vec<Evidence>,
    #[serde(default)]
    pub source_urls: Vec<String>,
}

impl CaseFile {
    pub fn new(
        case_id: impl Into<String>,
        title: impl Into<String>,
        location: impl Into<String>,
        raw_content: impl Into<String>,
    ) -> Self {
        Self {
            case_id: case_id.into(),
            title: title.into(),
            location: location.into(),
            date_occurred: None,
            raw_content: raw_content.into(),
            evidence: Vec::new(),
            source_urls: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date_occurred = Some(date.into());
        self
    }

    #[must_use]
    pub fn with_evidence(mut self, evidence: Evidence) -> Self {
        self.evidence.push(evidence);
        self
    }

    /// Reject records with blank identifying fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("case_id", &self.case_id)?;
        require_text("title", &self.title)?;
        require_text("location", &self.location)?;
        require_text("raw_content", &self.raw_content)?;
        for item in &self.evidence {
            require_text("evidence_id", &item.evidence_id)?;
            require_text("description", &item.description)?;
        }
        Ok(())
    }
}

//! Presentation request inputs
//!
//! `PresentationFormData` is the immutable input to a whole generation run.
//! It is created by the caller and only ever read by the pipeline stages.

use serde::{Deserialize, Serialize};

/// Metadata about a file the user attached to the request.
///
/// Raw bytes are not carried: no stage inspects file contents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub name: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub size_bytes: u64,
}

impl UploadedFile {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content_type: None,
            size_bytes: 0,
        }
    }
}

/// Everything the user filled in before starting a generation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PresentationFormData {
    pub company_name: String,
    /// e.g. "Board Presentation", "CIM", "Investment Committee Memo"
    pub presentation_type: String,
    pub target_audience: String,
    pub investment_thesis: String,
    /// Free-text research guidance appended to the market research query
    #[serde(default)]
    pub research_requirements: Option<String>,
    #[serde(default)]
    pub reference_files: Vec<UploadedFile>,
    #[serde(default)]
    pub financial_files: Vec<UploadedFile>,
}

impl PresentationFormData {
    /// Check that every required field carries text.
    pub fn validate(&self) -> Result<(), FormValidationError> {
        let required = [
            ("companyName", &self.company_name),
            ("presentationType", &self.presentation_type),
            ("targetAudience", &self.target_audience),
            ("investmentThesis", &self.investment_thesis),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(FormValidationError::MissingField(field));
            }
        }

        Ok(())
    }

    /// Research requirements, if the user wrote any
    pub fn research_requirements(&self) -> Option<&str> {
        self.research_requirements
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormValidationError {
    #[error("Field '{0}' is required")]
    MissingField(&'static str),
}

#[cfg(test)]
pub(crate) fn sample_form() -> PresentationFormData {
    PresentationFormData {
        company_name: "Acme".to_string(),
        presentation_type: "Board Presentation".to_string(),
        target_audience: "Board".to_string(),
        investment_thesis: "Grow 30% YoY".to_string(),
        research_requirements: None,
        reference_files: vec![],
        financial_files: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_complete_form() {
        assert!(sample_form().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_company() {
        let mut form = sample_form();
        form.company_name = "   ".to_string();
        assert_eq!(
            form.validate(),
            Err(FormValidationError::MissingField("companyName"))
        );
    }

    #[test]
    fn test_blank_research_requirements_are_ignored() {
        let mut form = sample_form();
        form.research_requirements = Some("  ".to_string());
        assert_eq!(form.research_requirements(), None);

        form.research_requirements = Some(" healthcare SaaS ".to_string());
        assert_eq!(form.research_requirements(), Some("healthcare SaaS"));
    }

    #[test]
    fn test_deserializes_camel_case_payload() {
        let form: PresentationFormData = serde_json::from_value(serde_json::json!({
            "companyName": "Acme",
            "presentationType": "Board Presentation",
            "targetAudience": "Board",
            "investmentThesis": "Grow 30% YoY",
            "financialFiles": [{"name": "model.xlsx"}]
        }))
        .unwrap();

        assert_eq!(form.company_name, "Acme");
        assert!(form.reference_files.is_empty());
        assert_eq!(form.financial_files[0].name, "model.xlsx");
    }
}

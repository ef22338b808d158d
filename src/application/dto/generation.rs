use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::services::{PipelineError, PresentationResult};
use crate::domain::value_objects::{GenerationProgress, GenerationStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStateDto {
    Running,
    Completed,
    Failed,
}

/// Why a run failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunErrorDto {
    pub kind: String,
    pub step: Option<GenerationStep>,
    pub message: String,
}

impl From<&PipelineError> for RunErrorDto {
    fn from(err: &PipelineError) -> Self {
        Self {
            kind: err.kind().to_string(),
            step: err.step(),
            message: err.to_string(),
        }
    }
}

/// Response to starting a generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartGenerationResponseDto {
    pub run_id: String,
}

/// Full state of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRunDto {
    pub run_id: String,
    pub company_name: String,
    pub state: RunStateDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub events: Vec<GenerationProgress>,
    pub result: Option<PresentationResult>,
    pub error: Option<RunErrorDto>,
}

/// One line in the run listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRunSummaryDto {
    pub run_id: String,
    pub company_name: String,
    pub state: RunStateDto,
    pub progress: u8,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::ProviderError;

    #[test]
    fn test_error_dto_from_pipeline_error() {
        let err = PipelineError::TextProvider {
            step: GenerationStep::DeckDna,
            source: ProviderError::Status {
                status: 500,
                body: "boom".to_string(),
            },
        };

        let dto = RunErrorDto::from(&err);
        assert_eq!(dto.kind, "text_provider");
        assert_eq!(dto.step, Some(GenerationStep::DeckDna));
        assert!(dto.message.contains("boom"));

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["step"], "deckDNA");
    }
}

//! Errors that abort a generation run

use crate::application::ports::outbound::{ProgressSinkError, ProviderError};
use crate::domain::entities::GenerationStatus;
use crate::domain::value_objects::GenerationStep;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Non-success response from the generative text provider
    #[error("{step} stage: text provider request failed: {source}")]
    TextProvider {
        step: GenerationStep,
        source: ProviderError,
    },
    /// Research provider failed and the research fallback policy is `Raise`
    #[error("{step} stage: research provider request failed: {source}")]
    ResearchProvider {
        step: GenerationStep,
        source: ProviderError,
    },
    /// Unparseable model output and the stage's fallback policy is `Raise`
    #[error("{step} stage: provider response did not contain valid JSON")]
    MalformedResponse { step: GenerationStep },
    #[error("gamma stage: deck builder request failed: {0}")]
    DeckBuilder(ProviderError),
    /// The provider reported `failed` or `error` for the job
    #[error("gamma stage: generation {generation_id} ended with status '{status}'")]
    GenerationFailed {
        generation_id: String,
        status: GenerationStatus,
    },
    #[error("gamma stage: generation {generation_id} still not finished after {attempts} status checks")]
    GenerationTimedOut { generation_id: String, attempts: u32 },
    #[error("gamma stage: generation {0} completed without a presentation URL")]
    MissingPresentationUrl(String),
    #[error(transparent)]
    ProgressSink(#[from] ProgressSinkError),
}

impl PipelineError {
    /// The stage the failure originated in, if it came from one
    pub fn step(&self) -> Option<GenerationStep> {
        match self {
            Self::TextProvider { step, .. }
            | Self::ResearchProvider { step, .. }
            | Self::MalformedResponse { step } => Some(*step),
            Self::DeckBuilder(_)
            | Self::GenerationFailed { .. }
            | Self::GenerationTimedOut { .. }
            | Self::MissingPresentationUrl(_) => Some(GenerationStep::Gamma),
            Self::ProgressSink(_) => None,
        }
    }

    /// Short machine-readable kind, used by the HTTP layer
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TextProvider { .. } => "text_provider",
            Self::ResearchProvider { .. } => "research_provider",
            Self::MalformedResponse { .. } => "malformed_response",
            Self::DeckBuilder(_) => "deck_builder",
            Self::GenerationFailed { .. } => "generation_failed",
            Self::GenerationTimedOut { .. } => "generation_timed_out",
            Self::MissingPresentationUrl(_) => "missing_presentation_url",
            Self::ProgressSink(_) => "progress_sink",
        }
    }
}

//! Value objects - Immutable objects defined by their attributes

mod deck_dna;
mod ids;
mod intelligence;
mod lenient;
mod presentation;
mod progress;
mod qa;
mod settings;

pub use deck_dna::DeckDna;
pub use ids::GenerationRunId;
pub use intelligence::{
    CompetitiveIntelligence, FinancialData, MarketResearch, ResearchResult, DEFAULT_MARKET_SHARE,
    DEFAULT_POSITIONING, DEFAULT_RESEARCH_ANSWER,
};
pub use presentation::{PresentationFormData, UploadedFile};
pub use progress::{GenerationProgress, GenerationStep, ProgressStatus};
pub use qa::{QaCategory, QaStatus, QaValidation, QaVerdictPolicy};
pub use settings::{qa_pass_probability_or_default, FallbackPolicy, PipelineSettings};

#[cfg(test)]
pub(crate) use presentation::sample_form;

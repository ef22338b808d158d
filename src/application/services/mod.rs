//! Application services - the generation stages and the pipeline that runs them
//!
//! Each stage is a small service over one outbound port with its own
//! fallback policy. `PresentationPipeline` sequences them and reports progress.

pub mod competitive_intelligence_service;
pub mod content_architecture_service;
pub mod deck_generation_service;
pub mod financial_data_service;
pub mod json_extraction;
pub mod llm;
pub mod market_research_service;
mod pipeline_error;
pub mod presentation_pipeline;
pub mod qa_validation_service;
pub mod style_profile_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use pipeline_error::PipelineError;

// Re-export pipeline types
pub use presentation_pipeline::{PipelinePorts, PresentationPipeline, PresentationResult};


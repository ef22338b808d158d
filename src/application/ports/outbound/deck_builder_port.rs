//! Presentation-building provider port
//!
//! Generation is asynchronous on the provider side: `submit` creates a job and
//! `fetch_status` reads its current state.

use async_trait::async_trait;

use super::ProviderError;
use crate::domain::entities::GammaGeneration;

#[derive(Debug, Clone, PartialEq)]
pub struct DeckBuildRequest {
    /// Natural-language brief for the whole deck
    pub input_text: String,
    /// "16x9"
    pub dimensions: String,
    /// "extensive"
    pub text_amount: String,
    /// "aiGenerated"
    pub image_source: String,
    pub additional_instructions: Option<String>,
}

impl DeckBuildRequest {
    pub fn new(input_text: impl Into<String>) -> Self {
        Self {
            input_text: input_text.into(),
            dimensions: "16x9".to_string(),
            text_amount: "extensive".to_string(),
            image_source: "aiGenerated".to_string(),
            additional_instructions: None,
        }
    }
}

#[async_trait]
pub trait DeckBuilderPort: Send + Sync {
    async fn submit(&self, request: &DeckBuildRequest) -> Result<GammaGeneration, ProviderError>;

    async fn fetch_status(&self, generation_id: &str) -> Result<GammaGeneration, ProviderError>;
}

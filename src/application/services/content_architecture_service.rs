//! Content Architecture Service - synthesizes the slide outline

use std::sync::Arc;

use super::json_extraction::{answer_text, extract_or_fallback, JsonShape};
use super::llm::prompt_builder::build_architecture_prompt;
use super::PipelineError;
use crate::application::ports::outbound::{TextGenerationPort, TextRequest};
use crate::domain::value_objects::{
    CompetitiveIntelligence, DeckDna, FallbackPolicy, FinancialData, GenerationStep,
    MarketResearch, PresentationFormData,
};

/// Outline used when the model's answer cannot be parsed
pub const DEFAULT_OUTLINE: [&str; 15] = [
    "Title Slide",
    "Executive Summary",
    "Investment Highlights",
    "Company Overview",
    "Market Opportunity",
    "Competitive Landscape",
    "Business Model",
    "Financial Performance",
    "Growth Strategy",
    "Management Team",
    "Investment Thesis",
    "Risk Factors",
    "Valuation",
    "Transaction Overview",
    "Appendix",
];

/// Everything upstream stages produced, handed to the outline stage
#[derive(Debug, Clone, Copy)]
pub struct ArchitectureInputs<'a> {
    pub form: &'a PresentationFormData,
    pub deck_dna: &'a DeckDna,
    pub research: &'a MarketResearch,
    pub competitive: &'a CompetitiveIntelligence,
    pub financials: &'a FinancialData,
}

pub struct ContentArchitectureService {
    llm: Arc<dyn TextGenerationPort>,
    parse_policy: FallbackPolicy,
}

impl ContentArchitectureService {
    pub fn new(llm: Arc<dyn TextGenerationPort>, parse_policy: FallbackPolicy) -> Self {
        Self { llm, parse_policy }
    }

    /// Request a 15-20 slide outline.
    ///
    /// Only the form data is embedded in the prompt; the other artifacts are
    /// accepted so richer prompts can use them without changing callers.
    pub async fn create_content_architecture(
        &self,
        inputs: ArchitectureInputs<'_>,
    ) -> Result<Vec<String>, PipelineError> {
        tracing::debug!(
            "Outline context: {} archetypes, {} research results, {} competitors, {} financial files",
            inputs.deck_dna.slide_archetypes.0.len(),
            inputs.research.results.len(),
            inputs.competitive.competitors.len(),
            inputs.financials.source_files.len()
        );

        let prompt = build_architecture_prompt(inputs.form);

        let answer = answer_text(
            self.llm
                .generate(TextRequest::new(prompt).with_max_tokens(2048))
                .await,
            GenerationStep::Architecture,
        )?;

        let outline: Vec<String> = extract_or_fallback(
            &answer,
            JsonShape::Array,
            GenerationStep::Architecture,
            self.parse_policy,
            default_outline,
        )?;

        tracing::info!("Content architecture has {} slides", outline.len());
        Ok(outline)
    }
}

pub fn default_outline() -> Vec<String> {
    DEFAULT_OUTLINE.iter().map(|title| title.to_string()).collect()
}

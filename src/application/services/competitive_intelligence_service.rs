//! Competitive Intelligence Service - structured competitor landscape

use std::sync::Arc;

use super::json_extraction::{answer_text, extract_or_fallback, JsonShape};
use super::llm::prompt_builder::build_competitive_prompt;
use super::PipelineError;
use crate::application::ports::outbound::{TextGenerationPort, TextRequest};
use crate::domain::value_objects::{
    CompetitiveIntelligence, FallbackPolicy, GenerationStep, MarketResearch, PresentationFormData,
};

pub struct CompetitiveIntelligenceService {
    llm: Arc<dyn TextGenerationPort>,
    research_budget_chars: usize,
    parse_policy: FallbackPolicy,
}

impl CompetitiveIntelligenceService {
    pub fn new(
        llm: Arc<dyn TextGenerationPort>,
        research_budget_chars: usize,
        parse_policy: FallbackPolicy,
    ) -> Self {
        Self {
            llm,
            research_budget_chars,
            parse_policy,
        }
    }

    pub async fn analyze_competitors(
        &self,
        form: &PresentationFormData,
        research: &MarketResearch,
    ) -> Result<CompetitiveIntelligence, PipelineError> {
        let prompt = build_competitive_prompt(form, research, self.research_budget_chars);

        let answer = answer_text(
            self.llm
                .generate(TextRequest::new(prompt).with_max_tokens(4096))
                .await,
            GenerationStep::Competitive,
        )?;

        let intel: CompetitiveIntelligence = extract_or_fallback(
            &answer,
            JsonShape::Object,
            GenerationStep::Competitive,
            self.parse_policy,
            CompetitiveIntelligence::default,
        )?;

        tracing::info!("Identified {} competitors", intel.competitors.len());
        Ok(intel)
    }
}

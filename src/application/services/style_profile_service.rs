//! Style Profile Service - extracts Deck DNA from reference inputs

use std::sync::Arc;

use super::json_extraction::{answer_text, extract_or_fallback, JsonShape};
use super::llm::prompt_builder::build_deck_dna_prompt;
use super::PipelineError;
use crate::application::ports::outbound::{TextGenerationPort, TextRequest};
use crate::domain::value_objects::{DeckDna, FallbackPolicy, GenerationStep, PresentationFormData};

pub struct StyleProfileService {
    llm: Arc<dyn TextGenerationPort>,
    parse_policy: FallbackPolicy,
}

impl StyleProfileService {
    pub fn new(llm: Arc<dyn TextGenerationPort>, parse_policy: FallbackPolicy) -> Self {
        Self { llm, parse_policy }
    }

    /// Ask the text provider for the deck's design profile.
    ///
    /// Transport and status failures propagate; unparseable or undecodable
    /// answers follow the parse policy.
    pub async fn extract_deck_dna(
        &self,
        form: &PresentationFormData,
    ) -> Result<DeckDna, PipelineError> {
        let request = TextRequest::new(build_deck_dna_prompt(form)).with_max_tokens(4096);

        let answer = answer_text(self.llm.generate(request).await, GenerationStep::DeckDna)?;

        extract_or_fallback(
            &answer,
            JsonShape::Object,
            GenerationStep::DeckDna,
            self.parse_policy,
            DeckDna::default,
        )
    }
}

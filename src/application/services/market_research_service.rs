//! Market Research Service - contextual market data from the research provider

use std::sync::Arc;

use super::llm::prompt_builder::{build_research_query, RESEARCH_DOMAINS};
use super::PipelineError;
use crate::application::ports::outbound::{ResearchPort, ResearchQuery};
use crate::domain::value_objects::{
    FallbackPolicy, GenerationStep, MarketResearch, PresentationFormData, DEFAULT_RESEARCH_ANSWER,
};

pub struct MarketResearchService {
    research: Arc<dyn ResearchPort>,
    max_results: u32,
    transport_policy: FallbackPolicy,
}

impl MarketResearchService {
    pub fn new(
        research: Arc<dyn ResearchPort>,
        max_results: u32,
        transport_policy: FallbackPolicy,
    ) -> Self {
        Self {
            research,
            max_results,
            transport_policy,
        }
    }

    /// Build the query for this form and run it against the allow-listed domains
    pub fn build_query(&self, form: &PresentationFormData) -> ResearchQuery {
        ResearchQuery {
            query: build_research_query(form),
            max_results: self.max_results,
            include_domains: RESEARCH_DOMAINS.iter().map(|d| d.to_string()).collect(),
            include_answer: true,
            include_raw_content: false,
        }
    }

    pub async fn conduct_research(
        &self,
        form: &PresentationFormData,
    ) -> Result<MarketResearch, PipelineError> {
        let query = self.build_query(form);

        match self.research.search(&query).await {
            Ok(response) => {
                tracing::info!(
                    "Market research returned {} results for '{}'",
                    response.results.len(),
                    query.query
                );
                Ok(MarketResearch {
                    answer: response
                        .answer
                        .filter(|answer| !answer.trim().is_empty())
                        .unwrap_or_else(|| DEFAULT_RESEARCH_ANSWER.to_string()),
                    results: response.results,
                    query: query.query,
                })
            }
            Err(source) => match self.transport_policy {
                FallbackPolicy::Raise => Err(PipelineError::ResearchProvider {
                    step: GenerationStep::Research,
                    source,
                }),
                FallbackPolicy::DegradeWithDefault => {
                    tracing::warn!("Market research unavailable, continuing without it: {}", source);
                    Ok(MarketResearch::unavailable(query.query))
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::ScriptedResearch;
    use crate::domain::value_objects::sample_form;

    #[tokio::test]
    async fn test_query_shape() {
        let research = Arc::new(ScriptedResearch::succeeding());
        let service = MarketResearchService::new(research.clone(), 15, FallbackPolicy::DegradeWithDefault);

        let result = service.conduct_research(&sample_form()).await.unwrap();
        assert_eq!(result.results.len(), 1);

        let queries = research.queries.lock().unwrap();
        let query = &queries[0];
        assert_eq!(query.max_results, 15);
        assert!(query.include_answer);
        assert!(!query.include_raw_content);
        assert!(query.include_domains.iter().any(|d| d == "pitchbook.com"));
        assert!(query.query.starts_with("Acme"));
    }

    #[tokio::test]
    async fn test_transport_failure_degrades() {
        let service = MarketResearchService::new(
            Arc::new(ScriptedResearch::failing(503)),
            15,
            FallbackPolicy::DegradeWithDefault,
        );

        let result = service.conduct_research(&sample_form()).await.unwrap();
        assert!(result.results.is_empty());
        assert_eq!(result.answer, DEFAULT_RESEARCH_ANSWER);
        assert!(result.query.starts_with("Acme"));
    }

    #[tokio::test]
    async fn test_transport_failure_raises_under_raise_policy() {
        let service = MarketResearchService::new(
            Arc::new(ScriptedResearch::failing(503)),
            15,
            FallbackPolicy::Raise,
        );

        let err = service.conduct_research(&sample_form()).await.unwrap_err();
        assert!(matches!(err, PipelineError::ResearchProvider { .. }));
    }
}

//! Shared application state

use std::sync::Arc;

use crate::application::services::{PipelinePorts, PresentationPipeline};
use crate::domain::value_objects::PipelineSettings;
use crate::infrastructure::clock::TokioSleeper;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::gamma::GammaClient;
use crate::infrastructure::llm_client::ChatCompletionsClient;
use crate::infrastructure::runs::GenerationRunRegistry;
use crate::infrastructure::tavily::TavilyClient;

/// Shared application state
pub struct AppState {
    pub pipeline: Arc<PresentationPipeline>,
    /// Running runs plus the most recently finished ones
    pub runs: Arc<GenerationRunRegistry>,
}

impl AppState {
    pub fn new(config: &AppConfig, settings: &PipelineSettings) -> Self {
        let ports = PipelinePorts {
            text: Arc::new(ChatCompletionsClient::new(
                &config.llm_base_url,
                &config.llm_api_key,
                &config.llm_model,
            )),
            research: Arc::new(TavilyClient::new(
                &config.tavily_base_url,
                &config.tavily_api_key,
            )),
            deck_builder: Arc::new(GammaClient::new(
                &config.gamma_base_url,
                &config.gamma_api_key,
            )),
            sleeper: Arc::new(TokioSleeper),
        };

        let pipeline = Arc::new(PresentationPipeline::new(ports, settings));

        Self {
            pipeline,
            runs: Arc::new(GenerationRunRegistry::with_finished_limit(
                config.max_finished_runs,
            )),
        }
    }
}

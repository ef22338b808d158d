//! Application configuration

use std::env;

use anyhow::{Context, Result};

/// Provider credentials and endpoints loaded from the environment
#[derive(Clone)]
pub struct AppConfig {
    /// OpenAI-compatible API base URL for the text provider
    pub llm_base_url: String,
    pub llm_api_key: String,
    pub llm_model: String,

    /// Research (search) API base URL
    pub tavily_base_url: String,
    pub tavily_api_key: String,

    /// Deck-building API base URL
    pub gamma_base_url: String,
    pub gamma_api_key: String,

    /// HTTP server port
    pub server_port: u16,

    /// Finished runs kept for lookup and replay before the oldest are dropped
    pub max_finished_runs: usize,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            llm_base_url: env::var("LLM_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            llm_api_key: env::var("LLM_API_KEY")
                .context("LLM_API_KEY environment variable is required")?,
            llm_model: env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),

            tavily_base_url: env::var("TAVILY_BASE_URL")
                .unwrap_or_else(|_| "https://api.tavily.com".to_string()),
            tavily_api_key: env::var("TAVILY_API_KEY")
                .context("TAVILY_API_KEY environment variable is required")?,

            gamma_base_url: env::var("GAMMA_BASE_URL")
                .unwrap_or_else(|_| "https://public-api.gamma.app/v0.2".to_string()),
            gamma_api_key: env::var("GAMMA_API_KEY")
                .context("GAMMA_API_KEY environment variable is required")?,

            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,

            max_finished_runs: env::var("MAX_FINISHED_RUNS")
                .unwrap_or_else(|_| "200".to_string())
                .parse()
                .context("MAX_FINISHED_RUNS must be a non-negative integer")?,
        })
    }
}

// Keys never reach logs through Debug
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("llm_base_url", &self.llm_base_url)
            .field("llm_api_key", &"<redacted>")
            .field("llm_model", &self.llm_model)
            .field("tavily_base_url", &self.tavily_base_url)
            .field("tavily_api_key", &"<redacted>")
            .field("gamma_base_url", &self.gamma_base_url)
            .field("gamma_api_key", &"<redacted>")
            .field("server_port", &self.server_port)
            .field("max_finished_runs", &self.max_finished_runs)
            .finish()
    }
}

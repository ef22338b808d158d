//! Tavily search client for market research

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::outbound::{
    ProviderError, ResearchPort, ResearchQuery, ResearchResponse,
};
use crate::domain::value_objects::ResearchResult;

/// Every query runs at the deeper, slower depth
const SEARCH_DEPTH: &str = "advanced";

pub struct TavilyClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TavilyClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Run one search. The key travels in the body, not a header.
    pub async fn search(&self, query: &ResearchQuery) -> Result<SearchResponse, TavilyError> {
        let request = SearchRequest {
            api_key: &self.api_key,
            query: &query.query,
            search_depth: SEARCH_DEPTH,
            max_results: query.max_results,
            include_domains: &query.include_domains,
            include_answer: query.include_answer,
            include_raw_content: query.include_raw_content,
        };

        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            return Err(TavilyError::ApiError {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let search_response: SearchResponse = response.json().await?;
        Ok(search_response)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TavilyError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error {status}: {body}")]
    ApiError { status: u16, body: String },
}

impl From<TavilyError> for ProviderError {
    fn from(err: TavilyError) -> Self {
        match err {
            TavilyError::HttpError(e) if e.is_decode() => ProviderError::Decode(e.to_string()),
            TavilyError::HttpError(e) => ProviderError::Transport(e.to_string()),
            TavilyError::ApiError { status, body } => ProviderError::Status { status, body },
        }
    }
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: &'a str,
    max_results: u32,
    include_domains: &'a [String],
    include_answer: bool,
    include_raw_content: bool,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub score: f64,
}

// =============================================================================
// ResearchPort Implementation
// =============================================================================

#[async_trait]
impl ResearchPort for TavilyClient {
    async fn search(&self, query: &ResearchQuery) -> Result<ResearchResponse, ProviderError> {
        let response = TavilyClient::search(self, query).await?;

        let results = response
            .results
            .into_iter()
            .map(|hit| ResearchResult {
                title: hit.title,
                url: hit.url,
                content: hit.content,
                score: hit.score,
            })
            .collect();

        Ok(ResearchResponse {
            answer: response.answer,
            results,
        })
    }
}

//! Research/search provider port

use async_trait::async_trait;

use super::ProviderError;
use crate::domain::value_objects::ResearchResult;

#[derive(Debug, Clone, PartialEq)]
pub struct ResearchQuery {
    pub query: String,
    pub max_results: u32,
    /// Only results from these domains are returned
    pub include_domains: Vec<String>,
    pub include_answer: bool,
    pub include_raw_content: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResearchResponse {
    pub answer: Option<String>,
    pub results: Vec<ResearchResult>,
}

#[async_trait]
pub trait ResearchPort: Send + Sync {
    async fn search(&self, query: &ResearchQuery) -> Result<ResearchResponse, ProviderError>;
}

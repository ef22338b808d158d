//! Generative text provider port

use async_trait::async_trait;

/// A single prompt/response exchange. No conversation state is kept between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl TextRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens: 4096,
            temperature: 0.3,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Failure talking to any external provider
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The request never produced an HTTP response
    #[error("request failed: {0}")]
    Transport(String),
    /// Non-success HTTP status
    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// Success status but the body was not in the expected shape
    #[error("unexpected response: {0}")]
    Decode(String),
}

#[async_trait]
pub trait TextGenerationPort: Send + Sync {
    /// Send the prompt and return the provider's free-text answer
    async fn generate(&self, request: TextRequest) -> Result<String, ProviderError>;
}

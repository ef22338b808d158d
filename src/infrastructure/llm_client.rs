//! OpenAI-compatible chat completions client for the text provider

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::outbound::{ProviderError, TextGenerationPort, TextRequest};

pub struct ChatCompletionsClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ChatCompletionsClient {
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    /// Send a single user message and return the first choice's text
    pub async fn complete(&self, request: &TextRequest) -> Result<String, LlmClientError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            return Err(LlmClientError::ApiError {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let completion: ChatResponse = response.json().await?;
        completion
            .first_content()
            .ok_or(LlmClientError::EmptyResponse)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error {status}: {body}")]
    ApiError { status: u16, body: String },
    #[error("response contained no message content")]
    EmptyResponse,
}

impl From<LlmClientError> for ProviderError {
    fn from(err: LlmClientError) -> Self {
        match err {
            LlmClientError::HttpError(e) if e.is_decode() => ProviderError::Decode(e.to_string()),
            LlmClientError::HttpError(e) => ProviderError::Transport(e.to_string()),
            LlmClientError::ApiError { status, body } => ProviderError::Status { status, body },
            empty @ LlmClientError::EmptyResponse => ProviderError::Decode(empty.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

impl ChatResponse {
    fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
    }
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

// =============================================================================
// TextGenerationPort Implementation
// =============================================================================

#[async_trait]
impl TextGenerationPort for ChatCompletionsClient {
    async fn generate(&self, request: TextRequest) -> Result<String, ProviderError> {
        Ok(self.complete(&request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let body = ChatRequest {
            model: "gpt-4o",
            messages: vec![ChatMessage {
                role: "user",
                content: "Extract the deck DNA",
            }],
            max_tokens: 4096,
            temperature: 0.3,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 4096);
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{
            "id": "chatcmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "{\"a\": 1}"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 9, "completion_tokens": 4, "total_tokens": 13}
        }"#;

        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.first_content().as_deref(), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_empty_choices_have_no_content() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(response.first_content().is_none());
    }

    #[test]
    fn test_api_error_maps_to_status() {
        let err: ProviderError = LlmClientError::ApiError {
            status: 500,
            body: "overloaded".to_string(),
        }
        .into();
        assert!(matches!(err, ProviderError::Status { status: 500, .. }));
    }
}

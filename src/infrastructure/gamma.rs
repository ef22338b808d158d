//! Gamma client for deck generation

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::outbound::{DeckBuildRequest, DeckBuilderPort, ProviderError};
use crate::domain::entities::{GammaGeneration, GenerationStatus};

const API_KEY_HEADER: &str = "X-API-KEY";

/// Client for the Gamma generations API
pub struct GammaClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GammaClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Start a generation job
    pub async fn create_generation(
        &self,
        request: &DeckBuildRequest,
    ) -> Result<CreateGenerationResponse, GammaError> {
        let body = CreateGenerationRequest::from(request);

        let response = self
            .client
            .post(format!("{}/generations", self.base_url))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            return Err(GammaError::ApiError {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let created: CreateGenerationResponse = response.json().await?;
        Ok(created)
    }

    /// Read the current state of a generation job
    pub async fn get_generation(
        &self,
        generation_id: &str,
    ) -> Result<GenerationStatusResponse, GammaError> {
        let response = self
            .client
            .get(format!("{}/generations/{}", self.base_url, generation_id))
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            return Err(GammaError::ApiError {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let generation: GenerationStatusResponse = response.json().await?;
        Ok(generation)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GammaError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error {status}: {body}")]
    ApiError { status: u16, body: String },
}

impl From<GammaError> for ProviderError {
    fn from(err: GammaError) -> Self {
        match err {
            GammaError::HttpError(e) if e.is_decode() => ProviderError::Decode(e.to_string()),
            GammaError::HttpError(e) => ProviderError::Transport(e.to_string()),
            GammaError::ApiError { status, body } => ProviderError::Status { status, body },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateGenerationRequest<'a> {
    input_text: &'a str,
    text_mode: &'static str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    additional_instructions: Option<&'a str>,
    text_options: TextOptions<'a>,
    image_options: ImageOptions<'a>,
    card_options: CardOptions<'a>,
}

impl<'a> From<&'a DeckBuildRequest> for CreateGenerationRequest<'a> {
    fn from(request: &'a DeckBuildRequest) -> Self {
        Self {
            input_text: &request.input_text,
            text_mode: "generate",
            format: "presentation",
            additional_instructions: request.additional_instructions.as_deref(),
            text_options: TextOptions {
                amount: &request.text_amount,
            },
            image_options: ImageOptions {
                source: &request.image_source,
            },
            card_options: CardOptions {
                dimensions: &request.dimensions,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct TextOptions<'a> {
    amount: &'a str,
}

#[derive(Debug, Serialize)]
struct ImageOptions<'a> {
    source: &'a str,
}

#[derive(Debug, Serialize)]
struct CardOptions<'a> {
    dimensions: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGenerationResponse {
    pub generation_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStatusResponse {
    #[serde(default)]
    pub generation_id: Option<String>,
    pub status: String,
    #[serde(default, alias = "url")]
    pub gamma_url: Option<String>,
}

impl GenerationStatusResponse {
    fn into_generation(self, requested_id: &str) -> GammaGeneration {
        GammaGeneration {
            generation_id: self
                .generation_id
                .unwrap_or_else(|| requested_id.to_string()),
            status: GenerationStatus::from_provider(&self.status),
            gamma_url: self.gamma_url.filter(|url| !url.is_empty()),
        }
    }
}

// =============================================================================
// DeckBuilderPort Implementation
// =============================================================================

#[async_trait]
impl DeckBuilderPort for GammaClient {
    async fn submit(&self, request: &DeckBuildRequest) -> Result<GammaGeneration, ProviderError> {
        let created = self.create_generation(request).await?;
        Ok(GammaGeneration::new(
            created.generation_id,
            GenerationStatus::Pending,
        ))
    }

    async fn fetch_status(&self, generation_id: &str) -> Result<GammaGeneration, ProviderError> {
        let response = self.get_generation(generation_id).await?;
        Ok(response.into_generation(generation_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_shape() {
        let request = DeckBuildRequest::new("Board deck for Acme");
        let json = serde_json::to_value(CreateGenerationRequest::from(&request)).unwrap();

        assert_eq!(json["inputText"], "Board deck for Acme");
        assert_eq!(json["textMode"], "generate");
        assert_eq!(json["format"], "presentation");
        assert_eq!(json["textOptions"]["amount"], "extensive");
        assert_eq!(json["imageOptions"]["source"], "aiGenerated");
        assert_eq!(json["cardOptions"]["dimensions"], "16x9");
        assert!(json.get("additionalInstructions").is_none());
    }

    #[test]
    fn test_create_response_parsing() {
        let created: CreateGenerationResponse =
            serde_json::from_str(r#"{"generationId": "gen-42"}"#).unwrap();
        assert_eq!(created.generation_id, "gen-42");
    }

    #[test]
    fn test_completed_status_maps_url() {
        let json = r#"{
            "generationId": "gen-42",
            "status": "completed",
            "gammaUrl": "https://gamma.app/docs/gen-42"
        }"#;
        let response: GenerationStatusResponse = serde_json::from_str(json).unwrap();
        let generation = response.into_generation("gen-42");

        assert_eq!(generation.status, GenerationStatus::Completed);
        assert_eq!(
            generation.gamma_url.as_deref(),
            Some("https://gamma.app/docs/gen-42")
        );
    }

    #[test]
    fn test_pending_status_without_id_uses_requested_id() {
        let response: GenerationStatusResponse =
            serde_json::from_str(r#"{"status": "pending", "gammaUrl": ""}"#).unwrap();
        let generation = response.into_generation("gen-7");

        assert_eq!(generation.generation_id, "gen-7");
        assert_eq!(generation.status, GenerationStatus::Pending);
        assert!(generation.gamma_url.is_none());
    }

    #[test]
    fn test_api_error_maps_to_status() {
        let err: ProviderError = GammaError::ApiError {
            status: 401,
            body: "invalid key".to_string(),
        }
        .into();
        assert!(matches!(err, ProviderError::Status { status: 401, .. }));
    }
}

//! Gemini backend using Google's generateContent API.

use brain_core::{async_trait, Brain, BrainError, ChatRequest};
use reqwest::{Client, RequestBuilder};
use tracing::{debug, info};

use crate::api_types::{
    Content, GeminiError, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};
use crate::config::VendorConfig;
use crate::{http_client, resolve_model, transport_error};

/// A brain that forwards turns to Gemini.
///
/// Gemini receives the conversation folded into a single text part. The API
/// key travels in the `x-goog-api-key` header, never in the URL.
pub struct GeminiBrain {
    client: Client,
    config: VendorConfig,
}

impl GeminiBrain {
    /// Create a new GeminiBrain with the given configuration.
    pub fn new(config: VendorConfig) -> Result<Self, BrainError> {
        let client = http_client()?;
        info!("GeminiBrain initialized with fallback model: {}", config.model);
        Ok(Self { client, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &VendorConfig {
        &self.config
    }

    fn build_request(&self, request: &ChatRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(request.folded_prompt()),
                }],
            }],
            generation_config: Some(GenerationConfig {
                max_output_tokens: self.config.max_tokens,
                temperature: self.config.temperature,
            }),
        }
    }

    fn http_request(&self, model: &str, body: &GenerateContentRequest) -> RequestBuilder {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_url.trim_end_matches('/'),
            model
        );

        self.client
            .post(url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(body)
    }
}

#[async_trait]
impl Brain for GeminiBrain {
    async fn send(&self, request: ChatRequest) -> Result<String, BrainError> {
        let model = resolve_model(&self.config, &request).to_string();
        let body = self.build_request(&request);

        debug!(model = %model, "Sending request to Gemini API");

        let response = self
            .http_request(&model, &body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<GeminiError>(&error_text)
                .map(|api_error| api_error.error.message)
                .unwrap_or(error_text);

            return Err(BrainError::ProcessingFailed(format!(
                "Gemini API error ({}): {}",
                status.as_u16(),
                detail
            )));
        }

        let reply: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| BrainError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        reply
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| BrainError::InvalidResponse("Gemini returned no content".to_string()))
    }

    fn name(&self) -> &str {
        "Gemini"
    }
}

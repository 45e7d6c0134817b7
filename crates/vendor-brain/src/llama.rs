//! LLaMA backend over the Hugging Face text-generation inference API.

use brain_core::{async_trait, Brain, BrainError, ChatRequest};
use reqwest::Client;
use tracing::{debug, info};

use crate::api_types::{GeneratedText, InferenceError, TextGenerationParameters, TextGenerationRequest};
use crate::config::VendorConfig;
use crate::{http_client, resolve_model, transport_error};

/// A brain that forwards turns to a hosted LLaMA checkpoint.
///
/// The API key is a Hugging Face access token. History is folded into the
/// prompt, and only the completion is returned (`return_full_text: false`).
pub struct LlamaBrain {
    client: Client,
    config: VendorConfig,
}

impl LlamaBrain {
    /// Create a new LlamaBrain with the given configuration.
    pub fn new(config: VendorConfig) -> Result<Self, BrainError> {
        let client = http_client()?;
        info!("LlamaBrain initialized with fallback model: {}", config.model);
        Ok(Self { client, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &VendorConfig {
        &self.config
    }

    fn model_url(&self, model: &str) -> String {
        format!(
            "{}/models/{}",
            self.config.api_url.trim_end_matches('/'),
            model
        )
    }

    fn build_request(&self, request: &ChatRequest) -> TextGenerationRequest {
        TextGenerationRequest {
            inputs: request.folded_prompt(),
            parameters: TextGenerationParameters {
                max_new_tokens: self.config.max_tokens,
                temperature: self.config.temperature,
                return_full_text: false,
            },
        }
    }
}

#[async_trait]
impl Brain for LlamaBrain {
    async fn send(&self, request: ChatRequest) -> Result<String, BrainError> {
        let model = resolve_model(&self.config, &request).to_string();
        let body = self.build_request(&request);

        debug!(model = %model, "Sending request to Hugging Face inference API");

        let response = self
            .client
            .post(self.model_url(&model))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<InferenceError>(&error_text)
                .map(|body| body.error)
                .unwrap_or(error_text);

            // 503 while the checkpoint is still loading
            if status.as_u16() == 503 {
                return Err(BrainError::Unavailable(format!("LLaMA model {}: {}", model, detail)));
            }

            return Err(BrainError::ProcessingFailed(format!(
                "LLaMA API error ({}): {}",
                status.as_u16(),
                detail
            )));
        }

        let generated: Vec<GeneratedText> = response
            .json()
            .await
            .map_err(|e| BrainError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        generated
            .into_iter()
            .next()
            .map(|sequence| sequence.generated_text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| BrainError::InvalidResponse("LLaMA returned no content".to_string()))
    }

    fn name(&self) -> &str {
        "LLaMA"
    }
}

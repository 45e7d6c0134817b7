//! ChatGPT backend using the OpenAI chat completions API.

use brain_core::{async_trait, Brain, BrainError, ChatRequest};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::api_types::{
    conversation_messages, ApiError, ChatCompletionRequest, ChatCompletionResponse,
};
use crate::config::VendorConfig;
use crate::{http_client, resolve_model, transport_error};

/// A brain that forwards turns to OpenAI's chat completions endpoint.
///
/// Prior conversation is sent as alternating user/assistant messages.
pub struct ChatGptBrain {
    client: Client,
    config: VendorConfig,
}

impl ChatGptBrain {
    /// Create a new ChatGptBrain with the given configuration.
    pub fn new(config: VendorConfig) -> Result<Self, BrainError> {
        let client = http_client()?;
        info!("ChatGptBrain initialized with fallback model: {}", config.model);
        Ok(Self { client, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &VendorConfig {
        &self.config
    }

    fn build_request(&self, request: &ChatRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: resolve_model(&self.config, request).to_string(),
            messages: conversation_messages(&request.history, &request.prompt),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }
}

#[async_trait]
impl Brain for ChatGptBrain {
    async fn send(&self, request: ChatRequest) -> Result<String, BrainError> {
        let url = format!("{}/v1/chat/completions", self.config.api_url);
        let body = self.build_request(&request);

        debug!(model = %body.model, messages = body.messages.len(), "Sending request to OpenAI API");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ApiError>(&error_text)
                .map(ApiError::detail)
                .unwrap_or(error_text);

            return Err(BrainError::ProcessingFailed(format!(
                "ChatGPT API error ({}): {}",
                status.as_u16(),
                detail
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| BrainError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        if let Some(usage) = &completion.usage {
            debug!(
                "Token usage - prompt: {}, completion: {}, total: {}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| {
                warn!("No content in ChatGPT response");
                BrainError::InvalidResponse("ChatGPT returned no content".to_string())
            })
    }

    fn name(&self) -> &str {
        "ChatGPT"
    }
}

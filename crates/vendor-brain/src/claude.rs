//! Claude backend using the Anthropic messages API.

use brain_core::{async_trait, Brain, BrainError, ChatRequest};
use reqwest::Client;
use tracing::{debug, info};

use crate::api_types::{conversation_messages, ApiError, MessagesRequest, MessagesResponse};
use crate::config::VendorConfig;
use crate::{http_client, resolve_model, transport_error};

/// Anthropic API version header value.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Marker after which Claude replies carry the useful part.
const SUMMARY_MARKER: &str = "Summary:";

/// A brain that forwards turns to Anthropic's messages endpoint.
pub struct ClaudeBrain {
    client: Client,
    config: VendorConfig,
}

impl ClaudeBrain {
    /// Create a new ClaudeBrain with the given configuration.
    pub fn new(config: VendorConfig) -> Result<Self, BrainError> {
        let client = http_client()?;
        info!("ClaudeBrain initialized with fallback model: {}", config.model);
        Ok(Self { client, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &VendorConfig {
        &self.config
    }

    fn build_request(&self, request: &ChatRequest) -> MessagesRequest {
        MessagesRequest {
            model: resolve_model(&self.config, request).to_string(),
            max_tokens: self.config.max_tokens.unwrap_or(1024),
            messages: conversation_messages(&request.history, &request.prompt),
            temperature: self.config.temperature,
        }
    }
}

/// Keep only the text after a `Summary:` marker, when present.
fn strip_summary_marker(text: &str) -> String {
    match text.find(SUMMARY_MARKER) {
        Some(index) => text[index + SUMMARY_MARKER.len()..].trim().to_string(),
        None => text.trim().to_string(),
    }
}

#[async_trait]
impl Brain for ClaudeBrain {
    async fn send(&self, request: ChatRequest) -> Result<String, BrainError> {
        let url = format!("{}/v1/messages", self.config.api_url);
        let body = self.build_request(&request);

        debug!(model = %body.model, messages = body.messages.len(), "Sending request to Anthropic API");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
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
                "Claude API error ({}): {}",
                status.as_u16(),
                detail
            )));
        }

        let reply: MessagesResponse = response
            .json()
            .await
            .map_err(|e| BrainError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let text = reply
            .content
            .iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            return Err(BrainError::InvalidResponse(
                "Claude returned no content".to_string(),
            ));
        }

        Ok(strip_summary_marker(&text))
    }

    fn name(&self) -> &str {
        "Claude"
    }
}

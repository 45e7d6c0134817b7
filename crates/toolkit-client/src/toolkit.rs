//! Toolkit implementation over HTTP.

use brain_core::{async_trait, BrainError, Toolkit, ToolkitOutput, ToolkitRequest};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::api_types::{ToolkitErrorBody, ToolkitResponse};
use crate::config::ToolkitConfig;

/// Calls the biomedical toolkit service.
///
/// Each operation is `POST {api_url}/v1/operations/{operation}` with the
/// [`ToolkitRequest`] as JSON body.
pub struct HttpToolkit {
    client: Client,
    config: ToolkitConfig,
}

impl HttpToolkit {
    /// Create a new HttpToolkit with the given configuration.
    pub fn new(config: ToolkitConfig) -> Result<Self, BrainError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                BrainError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        info!("HttpToolkit initialized for {}", config.api_url);

        Ok(Self { client, config })
    }

    /// Create an HttpToolkit from environment variables.
    pub fn from_env() -> Result<Self, BrainError> {
        Self::new(ToolkitConfig::from_env())
    }

    /// Get the configuration.
    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    fn operation_url(&self, operation: &str) -> String {
        format!(
            "{}/v1/operations/{}",
            self.config.api_url.trim_end_matches('/'),
            operation
        )
    }
}

#[async_trait]
impl Toolkit for HttpToolkit {
    async fn invoke(&self, request: ToolkitRequest) -> Result<ToolkitOutput, BrainError> {
        let url = self.operation_url(&request.operation);
        debug!(operation = %request.operation, model = %request.model, "Calling toolkit");

        let mut builder = self.client.post(&url).json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| BrainError::Network(format!("Failed to reach toolkit: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ToolkitErrorBody>(&error_text)
                .map(|body| body.error)
                .unwrap_or(error_text);

            return Err(BrainError::ProcessingFailed(format!(
                "toolkit {} failed ({}): {}",
                request.operation,
                status.as_u16(),
                detail
            )));
        }

        let reply: ToolkitResponse = response.json().await.map_err(|e| {
            BrainError::InvalidResponse(format!("Failed to parse toolkit response: {}", e))
        })?;

        Ok(reply.into())
    }

    fn supports(&self, operation: &str) -> bool {
        match &self.config.operations {
            Some(operations) => operations.iter().any(|op| op == operation),
            None => true,
        }
    }

    fn name(&self) -> &str {
        "HttpToolkit"
    }
}

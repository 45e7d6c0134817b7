//! Zero-shot classifier over a hosted NLI model.

use brain_core::{async_trait, BrainError, Classifier, ScoredLabel};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, trace};

use crate::api_types::{ClassifierErrorBody, ZeroShotParameters, ZeroShotRequest, ZeroShotResponse};
use crate::config::ClassifierConfig;

/// Zero-shot classifier using the Hugging Face inference API shape.
pub struct ZeroShotClassifier {
    client: Client,
    config: ClassifierConfig,
}

impl ZeroShotClassifier {
    /// Create a new classifier with the given configuration.
    pub fn new(config: ClassifierConfig) -> Result<Self, BrainError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                BrainError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        info!("ZeroShotClassifier initialized with model: {}", config.model);

        Ok(Self { client, config })
    }

    /// Create a classifier from environment variables.
    pub fn from_env() -> Result<Self, BrainError> {
        Self::new(ClassifierConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    fn model_url(&self) -> String {
        format!(
            "{}/models/{}",
            self.config.api_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl Classifier for ZeroShotClassifier {
    async fn classify(
        &self,
        text: &str,
        candidate_labels: &[&str],
    ) -> Result<Vec<ScoredLabel>, BrainError> {
        if candidate_labels.is_empty() {
            return Ok(Vec::new());
        }

        let body = ZeroShotRequest {
            inputs: text,
            parameters: ZeroShotParameters {
                candidate_labels,
                multi_label: false,
            },
        };

        debug!(labels = candidate_labels.len(), "Sending zero-shot request");

        let mut builder = self.client.post(self.model_url()).json(&body);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| BrainError::Network(format!("Failed to reach classifier: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ClassifierErrorBody>(&error_text)
                .map(|body| body.error)
                .unwrap_or(error_text);

            if status.as_u16() == 503 {
                return Err(BrainError::Unavailable(detail));
            }

            return Err(BrainError::ProcessingFailed(format!(
                "classifier error ({}): {}",
                status.as_u16(),
                detail
            )));
        }

        let reply: ZeroShotResponse = response.json().await.map_err(|e| {
            BrainError::InvalidResponse(format!("Failed to parse classifier response: {}", e))
        })?;

        let ranked = reply.into_ranked();
        trace!(ranked = ?ranked, "ZERO_SHOT_RANKING");
        Ok(ranked)
    }

    fn name(&self) -> &str {
        "ZeroShotClassifier"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_url() {
        let classifier = ZeroShotClassifier::new(ClassifierConfig::default()).unwrap();
        assert_eq!(
            classifier.model_url(),
            "https://api-inference.huggingface.co/models/facebook/bart-large-mnli"
        );
    }

    #[tokio::test]
    async fn test_empty_labels_short_circuit() {
        let classifier = ZeroShotClassifier::new(ClassifierConfig::default()).unwrap();
        let ranked = classifier.classify("anything", &[]).await.unwrap();
        assert!(ranked.is_empty());
    }
}

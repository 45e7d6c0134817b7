//! Configuration for the toolkit and classifier clients.

use brain_core::BrainError;
use std::env;

/// Default toolkit service URL.
pub const DEFAULT_TOOLKIT_URL: &str = "http://localhost:8000";

/// Default classifier endpoint (Hugging Face inference API).
pub const DEFAULT_CLASSIFIER_URL: &str = "https://api-inference.huggingface.co";

/// Default zero-shot model.
pub const DEFAULT_CLASSIFIER_MODEL: &str = "facebook/bart-large-mnli";

/// Configuration for [`crate::HttpToolkit`].
#[derive(Debug, Clone)]
pub struct ToolkitConfig {
    /// Base URL of the toolkit service.
    pub api_url: String,

    /// Optional bearer token.
    pub api_key: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Operations the service implements. `None` means all.
    pub operations: Option<Vec<String>>,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_TOOLKIT_URL.to_string(),
            api_key: None,
            timeout_secs: 120,
            operations: None,
        }
    }
}

impl ToolkitConfig {
    /// Create configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `TOOLKIT_API_URL` - Service URL (default: http://localhost:8000)
    /// - `TOOLKIT_API_KEY` - Bearer token
    /// - `TOOLKIT_TIMEOUT_SECS` - Request timeout (default: 120)
    /// - `TOOLKIT_OPERATIONS` - Comma-separated list of implemented operations
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            api_url: env::var("TOOLKIT_API_URL").unwrap_or(defaults.api_url),
            api_key: env::var("TOOLKIT_API_KEY")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            timeout_secs: env::var("TOOLKIT_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            operations: env::var("TOOLKIT_OPERATIONS").ok().map(|v| parse_list(&v)),
        }
    }

    /// Create a new config builder.
    pub fn builder() -> ToolkitConfigBuilder {
        ToolkitConfigBuilder::default()
    }
}

/// Builder for ToolkitConfig.
#[derive(Debug, Default)]
pub struct ToolkitConfigBuilder {
    config: ToolkitConfig,
}

impl ToolkitConfigBuilder {
    /// Set the service URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the bearer token.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    /// Restrict the implemented operations.
    pub fn operations<I, S>(mut self, operations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.operations = Some(operations.into_iter().map(Into::into).collect());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ToolkitConfig {
        self.config
    }
}

/// Configuration for [`crate::ZeroShotClassifier`].
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Inference API base URL.
    pub api_url: String,

    /// Model id.
    pub model: String,

    /// API token.
    pub api_key: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_CLASSIFIER_URL.to_string(),
            model: DEFAULT_CLASSIFIER_MODEL.to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

impl ClassifierConfig {
    /// Create configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `CLASSIFIER_API_URL` - Inference API URL
    /// - `CLASSIFIER_MODEL` - Model id (default: facebook/bart-large-mnli)
    /// - `HF_API_KEY` - API token
    /// - `CLASSIFIER_TIMEOUT_SECS` - Request timeout (default: 30)
    pub fn from_env() -> Result<Self, BrainError> {
        let defaults = Self::default();

        let model = env::var("CLASSIFIER_MODEL").unwrap_or(defaults.model);
        if model.trim().is_empty() {
            return Err(BrainError::Configuration(
                "CLASSIFIER_MODEL is empty".to_string(),
            ));
        }

        Ok(Self {
            api_url: env::var("CLASSIFIER_API_URL").unwrap_or(defaults.api_url),
            model,
            api_key: env::var("HF_API_KEY").ok().filter(|v| !v.trim().is_empty()),
            timeout_secs: env::var("CLASSIFIER_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        })
    }

    /// Create a new config builder.
    pub fn builder() -> ClassifierConfigBuilder {
        ClassifierConfigBuilder::default()
    }
}

/// Builder for ClassifierConfig.
#[derive(Debug, Default)]
pub struct ClassifierConfigBuilder {
    config: ClassifierConfig,
}

impl ClassifierConfigBuilder {
    /// Set the inference API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model id.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the API token.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ClassifierConfig {
        self.config
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

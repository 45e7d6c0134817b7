//! Configuration for the vendor brains.

use brain_core::{BrainError, CredentialStore};
use std::env;
use std::fmt;

/// External chat model family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VendorKind {
    /// OpenAI chat completions.
    ChatGpt,
    /// Anthropic messages.
    Claude,
    /// Google Gemini.
    Gemini,
    /// Meta LLaMA served by the Hugging Face inference API.
    Llama,
}

impl VendorKind {
    /// Every family, in menu order (matches the numeric aliases 1 to 4).
    pub const ALL: [VendorKind; 4] = [
        VendorKind::ChatGpt,
        VendorKind::Claude,
        VendorKind::Gemini,
        VendorKind::Llama,
    ];

    /// Lowercase name, also used as the credential and env-var key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChatGpt => "chatgpt",
            Self::Claude => "claude",
            Self::Gemini => "gemini",
            Self::Llama => "llama",
        }
    }

    /// Display name used in replies and logs.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ChatGpt => "ChatGPT",
            Self::Claude => "Claude",
            Self::Gemini => "Gemini",
            Self::Llama => "LLaMA",
        }
    }

    /// Prefix for this family's environment variables.
    pub fn env_prefix(&self) -> &'static str {
        match self {
            Self::ChatGpt => "CHATGPT",
            Self::Claude => "CLAUDE",
            Self::Gemini => "GEMINI",
            Self::Llama => "LLAMA",
        }
    }

    /// Default API base URL.
    pub fn default_api_url(&self) -> &'static str {
        match self {
            Self::ChatGpt => "https://api.openai.com",
            Self::Claude => "https://api.anthropic.com",
            Self::Gemini => "https://generativelanguage.googleapis.com",
            Self::Llama => "https://api-inference.huggingface.co",
        }
    }

    /// Model used when a request does not name one.
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::ChatGpt => "gpt-4o-mini",
            Self::Claude => "claude-3-5-sonnet-20240620",
            Self::Gemini => "gemini-1.5-flash",
            Self::Llama => "meta-llama/Llama-3.2-3B-Instruct",
        }
    }
}

impl fmt::Display for VendorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Configuration for one vendor brain.
#[derive(Debug, Clone)]
pub struct VendorConfig {
    /// Which vendor family this config talks to.
    pub kind: VendorKind,

    /// API base URL.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Fallback model name.
    pub model: String,

    /// Maximum tokens for response.
    pub max_tokens: Option<u32>,

    /// Temperature for generation.
    pub temperature: Option<f32>,
}

impl VendorConfig {
    /// Default configuration for a family, with no API key.
    pub fn new(kind: VendorKind) -> Self {
        Self {
            kind,
            api_url: kind.default_api_url().to_string(),
            api_key: String::new(),
            model: kind.default_model().to_string(),
            max_tokens: Some(1024),
            temperature: None,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// With `P` the family prefix (`CHATGPT`, `CLAUDE`, `GEMINI`, `LLAMA`):
    ///
    /// Required environment variables:
    /// - `P_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `P_API_URL` - API URL (default: the vendor's public endpoint)
    /// - `P_MODEL` - Fallback model name
    /// - `P_MAX_TOKENS` - Max tokens (default: 1024)
    /// - `P_TEMPERATURE` - Temperature (default: vendor default)
    pub fn from_env(kind: VendorKind) -> Result<Self, BrainError> {
        let prefix = kind.env_prefix();
        let key_var = format!("{}_API_KEY", prefix);

        let api_key = env::var(&key_var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| BrainError::Configuration(format!("{} not set", key_var)))?;

        let api_url = env::var(format!("{}_API_URL", prefix))
            .unwrap_or_else(|_| kind.default_api_url().to_string());

        let model = env::var(format!("{}_MODEL", prefix))
            .unwrap_or_else(|_| kind.default_model().to_string());

        let max_tokens = env::var(format!("{}_MAX_TOKENS", prefix))
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(1024));

        let temperature = env::var(format!("{}_TEMPERATURE", prefix))
            .ok()
            .and_then(|v| v.parse().ok());

        Ok(Self {
            kind,
            api_url,
            api_key,
            model,
            max_tokens,
            temperature,
        })
    }

    /// Create configuration with the key taken from a credential store.
    pub fn from_credentials(
        kind: VendorKind,
        credentials: &dyn CredentialStore,
    ) -> Result<Self, BrainError> {
        let api_key = credentials.get(kind.as_str()).ok_or_else(|| {
            BrainError::Configuration(format!("API key for {} is not set", kind.display_name()))
        })?;

        Ok(Self::builder(kind).api_key(api_key).build())
    }

    /// Create a new config builder.
    pub fn builder(kind: VendorKind) -> VendorConfigBuilder {
        VendorConfigBuilder {
            config: Self::new(kind),
        }
    }
}

/// Builder for VendorConfig.
#[derive(Debug)]
pub struct VendorConfigBuilder {
    config: VendorConfig,
}

impl VendorConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the fallback model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> VendorConfig {
        self.config
    }
}

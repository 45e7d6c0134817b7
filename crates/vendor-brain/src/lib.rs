//! Chat backends for the external model families.
//!
//! Each family gets one [`Brain`] implementation that speaks that vendor's
//! HTTP API:
//!
//! - [`ChatGptBrain`] - OpenAI chat completions
//! - [`ClaudeBrain`] - Anthropic messages
//! - [`GeminiBrain`] - Google `generateContent`
//! - [`LlamaBrain`] - Hugging Face text-generation inference
//!
//! All of them share [`VendorConfig`], which is loaded from environment
//! variables prefixed by the family name (`CHATGPT_`, `CLAUDE_`, `GEMINI_`,
//! `LLAMA_`).
//!
//! # Usage
//!
//! ```rust,no_run
//! use vendor_brain::{build_brain, VendorConfig, VendorKind};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = VendorConfig::from_env(VendorKind::Claude)?;
//! let brain = build_brain(config)?;
//! # let _ = brain;
//! # Ok(())
//! # }
//! ```

mod api_types;
mod chatgpt;
mod claude;
mod config;
mod gemini;
mod llama;

use std::sync::Arc;

pub use chatgpt::ChatGptBrain;
pub use claude::ClaudeBrain;
pub use config::{VendorConfig, VendorConfigBuilder, VendorKind};
pub use gemini::GeminiBrain;
pub use llama::LlamaBrain;

// Re-export brain-core types for convenience
pub use brain_core::{async_trait, Brain, BrainError, ChatRequest, HistoryEntry};

/// Default HTTP timeout for vendor API requests (60 seconds).
pub(crate) const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Build the brain matching `config.kind`.
pub fn build_brain(config: VendorConfig) -> Result<Arc<dyn Brain>, BrainError> {
    let brain: Arc<dyn Brain> = match config.kind {
        VendorKind::ChatGpt => Arc::new(ChatGptBrain::new(config)?),
        VendorKind::Claude => Arc::new(ClaudeBrain::new(config)?),
        VendorKind::Gemini => Arc::new(GeminiBrain::new(config)?),
        VendorKind::Llama => Arc::new(LlamaBrain::new(config)?),
    };
    Ok(brain)
}

/// Create the shared HTTP client used by every vendor brain.
pub(crate) fn http_client() -> Result<reqwest::Client, BrainError> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
        .build()
        .map_err(|e| BrainError::Configuration(format!("Failed to create HTTP client: {}", e)))
}

/// Map a transport failure. The request URL is dropped from the message so
/// query parameters never end up in a reply.
pub(crate) fn transport_error(e: reqwest::Error) -> BrainError {
    BrainError::Network(format!("Failed to send request: {}", e.without_url()))
}

/// Pick the request's model, falling back to the configured one.
pub(crate) fn resolve_model<'a>(config: &'a VendorConfig, request: &'a ChatRequest) -> &'a str {
    if request.model.trim().is_empty() {
        &config.model
    } else {
        &request.model
    }
}

//! HTTP clients for the internal collaborators.
//!
//! - [`HttpToolkit`] calls the biomedical NLP toolkit service, one endpoint
//!   per operation, and implements [`brain_core::Toolkit`].
//! - [`ZeroShotClassifier`] calls a hosted NLI model (Hugging Face inference
//!   API shape) and implements [`brain_core::Classifier`].

mod api_types;
mod classifier;
mod config;
mod toolkit;

pub use classifier::ZeroShotClassifier;
pub use config::{ClassifierConfig, ClassifierConfigBuilder, ToolkitConfig, ToolkitConfigBuilder};
pub use toolkit::HttpToolkit;

// Re-export brain-core types for convenience
pub use brain_core::{BrainError, Classifier, Toolkit, ToolkitOutput, ToolkitRequest};

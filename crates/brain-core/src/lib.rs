//! Collaborator traits and shared types for the command router.
//!
//! The routing core in the `orchestrator` crate never talks to a model
//! directly. Everything it calls out to sits behind one of the traits
//! defined here:
//!
//! - [`Brain`] - an external chat backend (one per vendor family)
//! - [`Classifier`] - a zero-shot text classifier over a caller-supplied label set
//! - [`Toolkit`] - the internal biomedical NLP toolkit, one operation per action
//! - [`CredentialStore`] - API key lookup used when constructing backends
//!
//! It also owns the conversation log types ([`ConversationHistory`],
//! [`HistoryEntry`]) because chat backends replay that log as context.
//!
//! # Example
//!
//! ```rust
//! use brain_core::{async_trait, Brain, BrainError, ChatRequest};
//!
//! struct Parrot;
//!
//! #[async_trait]
//! impl Brain for Parrot {
//!     async fn send(&self, request: ChatRequest) -> Result<String, BrainError> {
//!         Ok(request.prompt)
//!     }
//!
//!     fn name(&self) -> &str {
//!         "Parrot"
//!     }
//! }
//! ```

mod classifier;
mod credentials;
mod error;
mod history;
mod message;
mod toolkit;
mod trait_def;

pub use classifier::{Classifier, ScoredLabel};
pub use credentials::{CredentialStore, EnvCredentials, StaticCredentials};
pub use error::BrainError;
pub use history::{render_prompt_context, ConversationHistory, HistoryEntry, Role};
pub use message::ChatRequest;
pub use toolkit::{ArgumentBundle, RankedItem, Toolkit, ToolkitOutput, ToolkitRequest};
pub use trait_def::Brain;

// Re-export async_trait for convenience
pub use async_trait::async_trait;

//! Command router for the biomedical toolkit and external chat backends.
//!
//! This crate provides the [`Orchestrator`] type which takes a free-text
//! command, decides what the user wants, and dispatches it to either the
//! internal NLP toolkit or one of the external chat model families.
//!
//! # Architecture
//!
//! ```text
//! command (one turn)
//!          ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ORCHESTRATOR                           │
//! │                                                             │
//! │  1. Meta commands (help / show history / switch to X)       │
//! │         ↓                                                   │
//! │  2. Resolve target backend (Session selection, or topic     │
//! │     gate when RoutingPolicy::TopicGated)                    │
//! │         ↓                                                   │
//! │  3. Toolkit target:                                         │
//! │     • ActionClassifier: synonyms, then zero-shot fallback   │
//! │     • ArgumentExtractor: payload / language / key="value"   │
//! │     Chat target: raw command + prior history                │
//! │         ↓                                                   │
//! │  4. Dispatcher → Toolkit / Brain → Response                 │
//! │         ↓                                                   │
//! │  5. Append user + system entries to the session history     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let orchestrator = Orchestrator::from_env()?;
//!     let mut session = orchestrator.new_session();
//!
//!     println!("{}", orchestrator.process_command(&mut session, "switch to toolkit").await);
//!     let reply = orchestrator
//!         .process_command(&mut session, "summarize: The patient has a fever.")
//!         .await;
//!     println!("{}", reply);
//!     Ok(())
//! }
//! ```

mod actions;
mod classifier;
mod config;
mod dispatcher;
mod error;
mod extractor;
mod orchestrator;
mod registry;
mod response;
mod session;
pub mod syntax;

// Public exports
pub use actions::{Action, ArgumentShape};
pub use classifier::{ActionClassifier, Topic, TopicDetector, IN_DOMAIN_TOPICS, MEDICAL_KEYWORDS, TOPIC_LABELS};
pub use config::{
    OrchestratorConfig, OrchestratorConfigBuilder, RoutingPolicy, DEFAULT_LANGUAGE,
    DEFAULT_SUPPORTED_LANGUAGES,
};
pub use dispatcher::{Dispatcher, Intent, Turn};
pub use error::{ErrorKind, OrchestratorError};
pub use extractor::ArgumentExtractor;
pub use orchestrator::{help_text, Orchestrator, HELP_TEXT};
pub use registry::{Backend, ModelRegistry, ModelVersions, Selection, DEFAULT_TOOLKIT_MODEL};
pub use response::Response;
pub use session::Session;

// Re-export commonly used types from dependencies
pub use brain_core::{ArgumentBundle, HistoryEntry, RankedItem, Role};
pub use vendor_brain::VendorKind;

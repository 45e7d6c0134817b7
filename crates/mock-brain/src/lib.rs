//! Mock collaborators for testing the command router.
//!
//! This crate provides deterministic, in-memory implementations of the
//! `brain-core` traits:
//! - `EchoBrain` - echoes the prompt back and records every request
//! - `FailingBrain` - always fails, for error-path tests
//! - `ScriptedClassifier` - returns a fixed or keyword-driven ranking
//! - `RecordingToolkit` - returns canned outputs per operation and records calls
//!
//! For production backends, use the `vendor-brain` and `toolkit-client` crates.
//!
//! # Example
//!
//! ```rust
//! use mock_brain::{Brain, ChatRequest, EchoBrain};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_brain::BrainError> {
//!     let brain = EchoBrain::new();
//!     let reply = brain.send(ChatRequest::new("model", "Hello!")).await?;
//!     assert_eq!(reply, "Hello!");
//!     Ok(())
//! }
//! ```

mod classifier;
mod echo;
mod failing;
mod toolkit;

// Re-export brain-core types for convenience
pub use brain_core::{
    async_trait, Brain, BrainError, ChatRequest, Classifier, ScoredLabel, Toolkit, ToolkitOutput,
    ToolkitRequest,
};

pub use classifier::ScriptedClassifier;
pub use echo::EchoBrain;
pub use failing::FailingBrain;
pub use toolkit::RecordingToolkit;

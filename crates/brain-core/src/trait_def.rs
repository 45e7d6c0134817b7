//! The Brain trait definition.

use async_trait::async_trait;

use crate::error::BrainError;
use crate::message::ChatRequest;

/// An external chat backend.
///
/// Implementations forward the user's turn (plus prior conversation) to a
/// vendor chat API and return the generated text. Failures must be reported
/// as an error, never as a silently empty reply.
///
/// This trait is object-safe and can be used with `Arc<dyn Brain>`.
#[async_trait]
pub trait Brain: Send + Sync {
    /// Send one conversational turn and return the reply text.
    async fn send(&self, request: ChatRequest) -> Result<String, BrainError>;

    /// Get a human-readable name for this backend.
    fn name(&self) -> &str;

    /// Check if the backend is ready to accept requests.
    ///
    /// Default implementation always returns true.
    async fn is_ready(&self) -> bool {
        true
    }
}

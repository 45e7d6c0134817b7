//! Request type passed to chat backends.

use crate::history::{render_prompt_context, HistoryEntry};

/// One turn forwarded to an external chat backend.
///
/// `prompt` is the user's raw command, verbatim. `history` holds the turns
/// that came before it, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// Vendor model identifier to use for this turn.
    pub model: String,
    /// The raw command text.
    pub prompt: String,
    /// Prior conversation, in insertion order.
    pub history: Vec<HistoryEntry>,
}

impl ChatRequest {
    /// Create a request with no prior conversation.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            history: Vec::new(),
        }
    }

    /// Attach prior conversation to the request.
    pub fn with_history(mut self, history: Vec<HistoryEntry>) -> Self {
        self.history = history;
        self
    }

    /// Fold history and prompt into a single text blob.
    ///
    /// Used by backends that take one prompt string rather than a message list.
    pub fn folded_prompt(&self) -> String {
        if self.history.is_empty() {
            return self.prompt.clone();
        }

        let mut folded = render_prompt_context(&self.history);
        folded.push_str("\nUser: ");
        folded.push_str(&self.prompt);
        folded.push_str("\nAssistant:");
        folded
    }
}

//! Failing brain implementation - every call errors.

use async_trait::async_trait;
use brain_core::{Brain, BrainError, ChatRequest};

/// A brain whose every call fails with `ProcessingFailed`.
#[derive(Debug, Clone)]
pub struct FailingBrain {
    message: String,
}

impl FailingBrain {
    /// Create a failing brain with the given error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for FailingBrain {
    fn default() -> Self {
        Self::new("backend unavailable")
    }
}

#[async_trait]
impl Brain for FailingBrain {
    async fn send(&self, _request: ChatRequest) -> Result<String, BrainError> {
        Err(BrainError::ProcessingFailed(self.message.clone()))
    }

    fn name(&self) -> &str {
        "FailingBrain"
    }
}

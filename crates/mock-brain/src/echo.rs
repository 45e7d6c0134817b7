//! Echo brain implementation - echoes prompts back.

use async_trait::async_trait;
use brain_core::{Brain, BrainError, ChatRequest};
use tokio::sync::Mutex;

/// A brain that echoes the prompt back.
///
/// Every request is recorded so tests can assert on the model id and the
/// history that was forwarded.
#[derive(Debug, Default)]
pub struct EchoBrain {
    /// Optional prefix to add before the echo.
    prefix: Option<String>,
    /// Name reported by [`Brain::name`].
    name: Option<String>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl EchoBrain {
    /// Create a new EchoBrain with no prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new EchoBrain with a custom prefix.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mock_brain::EchoBrain;
    ///
    /// let brain = EchoBrain::with_prefix("Claude: ");
    /// // Will respond with "Claude: <prompt>"
    /// ```
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            ..Self::default()
        }
    }

    /// Override the reported name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Every request received so far, in order.
    pub async fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl Brain for EchoBrain {
    async fn send(&self, request: ChatRequest) -> Result<String, BrainError> {
        let reply = match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, request.prompt),
            None => request.prompt.clone(),
        };
        self.requests.lock().await.push(request);
        Ok(reply)
    }

    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("EchoBrain")
    }
}

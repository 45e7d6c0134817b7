//! Recording toolkit implementation.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use brain_core::{BrainError, Toolkit, ToolkitOutput, ToolkitRequest};
use tokio::sync::Mutex;

/// A toolkit that returns canned outputs and records every request.
///
/// Operations without a canned output reply with
/// `ToolkitOutput::Text("[<operation>] <json args>")`.
#[derive(Debug, Default)]
pub struct RecordingToolkit {
    outputs: HashMap<String, ToolkitOutput>,
    unsupported: HashSet<String>,
    failing: HashSet<String>,
    requests: Mutex<Vec<ToolkitRequest>>,
}

impl RecordingToolkit {
    /// Create a toolkit that supports every operation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `output` for every call to `operation`.
    pub fn with_output(mut self, operation: impl Into<String>, output: ToolkitOutput) -> Self {
        self.outputs.insert(operation.into(), output);
        self
    }

    /// Report `operation` as not implemented.
    pub fn without(mut self, operation: impl Into<String>) -> Self {
        self.unsupported.insert(operation.into());
        self
    }

    /// Fail every call to `operation`.
    pub fn failing_on(mut self, operation: impl Into<String>) -> Self {
        self.failing.insert(operation.into());
        self
    }

    /// Every request received so far, in order.
    pub async fn requests(&self) -> Vec<ToolkitRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl Toolkit for RecordingToolkit {
    async fn invoke(&self, request: ToolkitRequest) -> Result<ToolkitOutput, BrainError> {
        let operation = request.operation.clone();
        let args = serde_json::to_string(&request.args).unwrap_or_default();
        self.requests.lock().await.push(request);

        if self.failing.contains(&operation) {
            return Err(BrainError::ProcessingFailed(format!(
                "{operation} crashed"
            )));
        }

        Ok(self
            .outputs
            .get(&operation)
            .cloned()
            .unwrap_or_else(|| ToolkitOutput::Text(format!("[{operation}] {args}"))))
    }

    fn supports(&self, operation: &str) -> bool {
        !self.unsupported.contains(operation)
    }

    fn name(&self) -> &str {
        "RecordingToolkit"
    }
}

//! The normalized reply shape for one command.

use brain_core::{RankedItem, ToolkitOutput};

use crate::error::{ErrorKind, OrchestratorError};

/// What a command produced, regardless of which backend handled it.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Free text (summaries, translations, chat replies, rendered records).
    Text(String),
    /// Ranked rows, best first.
    RankedList(Vec<RankedItem>),
    /// The command failed; the session continues.
    Error { kind: ErrorKind, message: String },
}

impl Response {
    /// Render for display and for the history log.
    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::RankedList(items) if items.is_empty() => "No results.".to_string(),
            Self::RankedList(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| format!("{}. {} (score: {:.4})", i + 1, item.id, item.score))
                .collect::<Vec<_>>()
                .join("\n"),
            Self::Error { message, .. } => format!("Error: {}", message),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// The error kind, if this is an error.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Error { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

impl From<ToolkitOutput> for Response {
    fn from(output: ToolkitOutput) -> Self {
        match output {
            ToolkitOutput::Text(text) => Self::Text(text),
            ToolkitOutput::Ranked(items) => Self::RankedList(items),
            ToolkitOutput::Structured(value) => Self::Text(
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()),
            ),
        }
    }
}

impl From<&OrchestratorError> for Response {
    fn from(err: &OrchestratorError) -> Self {
        Self::Error {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

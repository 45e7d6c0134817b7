//! Internal toolkit support.
//!
//! The biomedical toolkit is an opaque capability provider: it exposes one
//! named operation per supported action and accepts a structured argument
//! bundle whose shape depends on the action.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BrainError;

/// Structured payload extracted from a command.
///
/// Serializes to the flat object shapes the toolkit expects, e.g.
/// `{"text": "..."}` or `{"query": "...", "candidates": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArgumentBundle {
    /// Single-text actions.
    Text { text: String },
    /// Translation.
    Translation {
        text: String,
        target_language: String,
    },
    /// Similarity search and clustering.
    Similarity {
        query: String,
        candidates: Vec<String>,
    },
    /// Multiple-choice question answering.
    MultipleChoice {
        passage: String,
        question: String,
        choices: Vec<String>,
    },
    /// Span answer.
    Span { question: String, content: String },
}

impl ArgumentBundle {
    /// Create a single-text bundle.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Name of the first required field that is empty, if any.
    ///
    /// Candidate lists may be empty; every other field must carry content.
    pub fn first_empty_field(&self) -> Option<&'static str> {
        fn blank(value: &str) -> bool {
            value.trim().is_empty()
        }

        match self {
            Self::Text { text } => blank(text).then_some("text"),
            Self::Translation {
                text,
                target_language,
            } => {
                if blank(text) {
                    Some("text")
                } else if blank(target_language) {
                    Some("target_language")
                } else {
                    None
                }
            }
            Self::Similarity { query, .. } => blank(query).then_some("record"),
            Self::MultipleChoice {
                passage,
                question,
                choices,
            } => {
                if blank(passage) {
                    Some("text")
                } else if blank(question) {
                    Some("question")
                } else if choices.is_empty() {
                    Some("choices")
                } else {
                    None
                }
            }
            Self::Span { question, content } => {
                if blank(question) {
                    Some("question")
                } else if blank(content) {
                    Some("content")
                } else {
                    None
                }
            }
        }
    }
}

/// A call to one toolkit operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolkitRequest {
    /// Operation name (one per action, e.g. `summarize`).
    pub operation: String,
    /// Toolkit model version / checkpoint to run.
    pub model: String,
    /// Structured arguments.
    pub args: ArgumentBundle,
}

impl ToolkitRequest {
    /// Create a toolkit request.
    pub fn new(operation: impl Into<String>, model: impl Into<String>, args: ArgumentBundle) -> Self {
        Self {
            operation: operation.into(),
            model: model.into(),
            args,
        }
    }
}

/// A ranked result row, e.g. a similar document and its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedItem {
    /// Identifier of the ranked item (candidate index or label).
    pub id: String,
    /// Score (higher ranks first).
    pub score: f64,
}

impl RankedItem {
    /// Create a ranked item.
    pub fn new(id: impl Into<String>, score: f64) -> Self {
        Self {
            id: id.into(),
            score,
        }
    }
}

/// What a toolkit operation returned.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolkitOutput {
    /// Plain text (summaries, translations, generated questions).
    Text(String),
    /// Structured records (entities, tags, abbreviations).
    Structured(serde_json::Value),
    /// Ranked rows (similar documents, clusters).
    Ranked(Vec<RankedItem>),
}

/// The internal biomedical NLP toolkit.
#[async_trait]
pub trait Toolkit: Send + Sync {
    /// Run one operation.
    async fn invoke(&self, request: ToolkitRequest) -> Result<ToolkitOutput, BrainError>;

    /// Whether the toolkit implements the named operation.
    ///
    /// Default implementation accepts every operation.
    fn supports(&self, operation: &str) -> bool {
        let _ = operation;
        true
    }

    /// Get a human-readable name for this toolkit.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_serializes_flat() {
        let bundle = ArgumentBundle::Similarity {
            query: "A".to_string(),
            candidates: vec!["B".to_string(), "C".to_string()],
        };
        let json = serde_json::to_value(&bundle).unwrap();
        assert_eq!(json, serde_json::json!({"query": "A", "candidates": ["B", "C"]}));
    }

    #[test]
    fn test_request_serializes_with_args() {
        let request = ToolkitRequest::new("summarize", "bart", ArgumentBundle::text("fever"));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"operation": "summarize", "model": "bart", "args": {"text": "fever"}})
        );
    }

    #[test]
    fn test_first_empty_field() {
        assert_eq!(ArgumentBundle::text("  ").first_empty_field(), Some("text"));
        assert_eq!(ArgumentBundle::text("ok").first_empty_field(), None);

        let similarity = ArgumentBundle::Similarity {
            query: "A".to_string(),
            candidates: Vec::new(),
        };
        assert_eq!(similarity.first_empty_field(), None);

        let mcq = ArgumentBundle::MultipleChoice {
            passage: "p".to_string(),
            question: "q".to_string(),
            choices: Vec::new(),
        };
        assert_eq!(mcq.first_empty_field(), Some("choices"));

        let span = ArgumentBundle::Span {
            question: "q".to_string(),
            content: String::new(),
        };
        assert_eq!(span.first_empty_field(), Some("content"));
    }
}

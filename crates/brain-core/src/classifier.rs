//! Zero-shot classification support.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BrainError;

/// A candidate label with its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredLabel {
    /// The label, exactly as passed in the candidate set.
    pub label: String,
    /// Model confidence (higher is better).
    pub score: f64,
}

impl ScoredLabel {
    /// Create a scored label.
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// A semantic zero-shot text classifier.
///
/// Given a text and an arbitrary set of candidate labels, returns the labels
/// ranked best-first. Callers in this workspace only look at the top entry.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Rank `candidate_labels` for `text`, best first.
    async fn classify(
        &self,
        text: &str,
        candidate_labels: &[&str],
    ) -> Result<Vec<ScoredLabel>, BrainError>;

    /// Get a human-readable name for this classifier.
    fn name(&self) -> &str;
}

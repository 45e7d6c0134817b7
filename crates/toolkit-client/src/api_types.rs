//! Wire types for the toolkit service and the classifier API.

use brain_core::{RankedItem, ScoredLabel, ToolkitOutput};
use serde::{Deserialize, Serialize};

/// Toolkit service reply.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToolkitResponse {
    /// Plain text result.
    Text { text: String },
    /// Structured records.
    Structured { data: serde_json::Value },
    /// Ranked rows.
    Ranked { items: Vec<RankedItem> },
}

impl From<ToolkitResponse> for ToolkitOutput {
    fn from(response: ToolkitResponse) -> Self {
        match response {
            ToolkitResponse::Text { text } => ToolkitOutput::Text(text),
            ToolkitResponse::Structured { data } => ToolkitOutput::Structured(data),
            ToolkitResponse::Ranked { mut items } => {
                items.sort_by(|a, b| b.score.total_cmp(&a.score));
                ToolkitOutput::Ranked(items)
            }
        }
    }
}

/// Toolkit service error body.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolkitErrorBody {
    /// Error message
    #[serde(alias = "detail")]
    pub error: String,
}

/// Zero-shot classification request.
#[derive(Debug, Clone, Serialize)]
pub struct ZeroShotRequest<'a> {
    /// Text to classify
    pub inputs: &'a str,
    /// Classification parameters
    pub parameters: ZeroShotParameters<'a>,
}

/// Zero-shot parameters.
#[derive(Debug, Clone, Serialize)]
pub struct ZeroShotParameters<'a> {
    /// Candidate labels
    pub candidate_labels: &'a [&'a str],
    /// Whether labels are independent
    pub multi_label: bool,
}

/// Zero-shot classification response, in either of the shapes the
/// inference API has used.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ZeroShotResponse {
    /// `{"sequence": ..., "labels": [...], "scores": [...]}`
    Columns {
        labels: Vec<String>,
        scores: Vec<f64>,
    },
    /// `[{"label": ..., "score": ...}, ...]`
    Rows(Vec<ScoredLabel>),
}

impl ZeroShotResponse {
    /// Flatten into labels ranked best-first.
    pub fn into_ranked(self) -> Vec<ScoredLabel> {
        let mut ranked: Vec<ScoredLabel> = match self {
            Self::Columns { labels, scores } => labels
                .into_iter()
                .zip(scores)
                .map(|(label, score)| ScoredLabel::new(label, score))
                .collect(),
            Self::Rows(rows) => rows,
        };
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }
}

/// Classifier API error body.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierErrorBody {
    /// Error message
    pub error: String,
}

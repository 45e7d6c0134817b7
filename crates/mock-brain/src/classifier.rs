//! Scripted zero-shot classifier.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use brain_core::{BrainError, Classifier, ScoredLabel};

/// A classifier with a predictable ranking.
///
/// Keyword rules are checked first (case-insensitive substring match on the
/// input text). When no rule fires, the fallback label wins if it is among
/// the candidates, otherwise the candidates are ranked in the order given.
#[derive(Debug, Default)]
pub struct ScriptedClassifier {
    rules: Vec<(String, String)>,
    fallback: Option<String>,
    fail: bool,
    calls: AtomicUsize,
}

impl ScriptedClassifier {
    /// Create a classifier that ranks candidates in the order given.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rank `label` first whenever `keyword` appears in the text.
    pub fn with_rule(mut self, keyword: impl Into<String>, label: impl Into<String>) -> Self {
        self.rules.push((keyword.into().to_lowercase(), label.into()));
        self
    }

    /// Rank `label` first when no rule matches.
    pub fn with_fallback(mut self, label: impl Into<String>) -> Self {
        self.fallback = Some(label.into());
        self
    }

    /// A classifier whose every call fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Number of `classify` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn winner(&self, text: &str, candidate_labels: &[&str]) -> Option<String> {
        let lowered = text.to_lowercase();
        self.rules
            .iter()
            .find(|(keyword, label)| {
                lowered.contains(keyword.as_str()) && candidate_labels.contains(&label.as_str())
            })
            .map(|(_, label)| label.clone())
            .or_else(|| {
                self.fallback
                    .clone()
                    .filter(|label| candidate_labels.contains(&label.as_str()))
            })
    }
}

#[async_trait]
impl Classifier for ScriptedClassifier {
    async fn classify(
        &self,
        text: &str,
        candidate_labels: &[&str],
    ) -> Result<Vec<ScoredLabel>, BrainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(BrainError::Unavailable("classifier offline".to_string()));
        }

        let mut ordered: Vec<String> = candidate_labels.iter().map(|l| l.to_string()).collect();
        if let Some(winner) = self.winner(text, candidate_labels) {
            ordered.retain(|label| *label != winner);
            ordered.insert(0, winner);
        }

        let step = 1.0 / (ordered.len().max(1) as f64 + 1.0);
        Ok(ordered
            .into_iter()
            .enumerate()
            .map(|(i, label)| ScoredLabel::new(label, 1.0 - step * (i as f64 + 1.0)))
            .collect())
    }

    fn name(&self) -> &str {
        "ScriptedClassifier"
    }
}

//! Action and topic classification.
//!
//! Action resolution is two-tier: whole-word synonym matching over the
//! instruction part of the command, then a zero-shot classifier over every
//! action label. A synonym hit always wins; the classifier is not consulted
//! at all.

use std::cmp::Reverse;
use std::sync::Arc;

use brain_core::{BrainError, Classifier};
use regex::Regex;
use tracing::{debug, info};

use crate::actions::{instruction, phrase_pattern, Action};
use crate::error::OrchestratorError;

/// Candidate labels for topic detection.
pub const TOPIC_LABELS: &[&str] = &[
    "medical",
    "healthcare",
    "biology",
    "medicine",
    "technology",
    "finance",
    "sports",
    "education",
    "entertainment",
];

/// Topics routed to the internal toolkit under topic gating.
pub const IN_DOMAIN_TOPICS: &[&str] = &["medical", "medicine", "healthcare"];

/// Substrings that force a command in-domain regardless of the classifier.
pub const MEDICAL_KEYWORDS: &[&str] = &[
    "cells",
    "immunosuppressive",
    "disease",
    "virus",
    "neurons",
    "arthritis",
    "treatment",
    "symptoms",
];

/// Resolves a command to an [`Action`].
pub struct ActionClassifier {
    /// Synonym matchers in priority order.
    patterns: Vec<(Action, Regex)>,
    fallback: Arc<dyn Classifier>,
}

impl ActionClassifier {
    /// Build the synonym matchers and wrap the semantic fallback.
    pub fn new(fallback: Arc<dyn Classifier>) -> Result<Self, OrchestratorError> {
        let patterns = Action::PRIORITY
            .into_iter()
            .map(|action| Ok((action, phrase_pattern(action.synonyms())?)))
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Self { patterns, fallback })
    }

    /// Deterministic pass only.
    ///
    /// Only the text before the first colon is searched. The earliest match
    /// wins; at the same position the longer phrase wins, then priority order.
    pub fn match_synonyms(&self, command: &str) -> Option<Action> {
        let instruction = instruction(command);

        self.patterns
            .iter()
            .enumerate()
            .filter_map(|(rank, (action, pattern))| {
                let found = pattern.find(instruction)?;
                Some(((found.start(), Reverse(found.len()), rank), *action))
            })
            .min_by_key(|(key, _)| *key)
            .map(|(_, action)| action)
    }

    /// Resolve the action for `command`.
    ///
    /// Fallback classifier failures surface as `Collaborator`; a top label
    /// outside the action set is `UnrecognizedAction`.
    pub async fn identify_action(&self, command: &str) -> Result<Action, OrchestratorError> {
        if let Some(action) = self.match_synonyms(command) {
            debug!(action = %action, "Action matched by synonym");
            return Ok(action);
        }

        let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();
        let ranked = self.fallback.classify(command, &labels).await?;
        let top = ranked.first().ok_or_else(|| {
            BrainError::InvalidResponse(format!("{} returned no labels", self.fallback.name()))
        })?;

        let action = Action::from_label(&top.label)
            .ok_or_else(|| OrchestratorError::UnrecognizedAction(top.label.clone()))?;
        info!(action = %action, score = top.score, "Action resolved by classifier");
        Ok(action)
    }
}

/// Outcome of topic detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub label: String,
    pub in_domain: bool,
}

/// Decides whether a command is in-domain for the toolkit.
pub struct TopicDetector {
    classifier: Arc<dyn Classifier>,
}

impl TopicDetector {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    /// Detect the topic of `command`. A medical keyword short-circuits the
    /// classifier call.
    pub async fn detect(&self, command: &str) -> Result<Topic, OrchestratorError> {
        let lowered = command.to_lowercase();
        if MEDICAL_KEYWORDS.iter().any(|keyword| lowered.contains(keyword)) {
            debug!("Medical keyword present");
            return Ok(Topic {
                label: "medical".to_string(),
                in_domain: true,
            });
        }

        let ranked = self.classifier.classify(command, TOPIC_LABELS).await?;
        let label = ranked
            .into_iter()
            .next()
            .map(|top| top.label)
            .ok_or_else(|| {
                BrainError::InvalidResponse(format!("{} returned no labels", self.classifier.name()))
            })?;

        let in_domain = IN_DOMAIN_TOPICS.contains(&label.as_str());
        debug!(topic = %label, in_domain, "Topic detected");
        Ok(Topic { label, in_domain })
    }
}

//! Conversation history management.
//!
//! The log is append-only: entries are never removed or reordered, and the
//! insertion order is the conversation order that gets replayed into
//! backends needing context.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who produced a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person typing commands.
    User,
    /// The router's reply for that turn.
    System,
}

impl Role {
    /// Lowercase name, as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::System => "system",
        }
    }

    /// Speaker label used when folding history into a prompt.
    pub fn prompt_label(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::System => "Assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single turn half in the conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Role: user or system
    pub role: Role,
    /// Message content
    pub message: String,
}

impl HistoryEntry {
    /// Create a user entry.
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            message: message.into(),
        }
    }

    /// Create a system entry.
    pub fn system(message: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            message: message.into(),
        }
    }
}

/// Render entries as alternating `User:` / `Assistant:` lines.
pub fn render_prompt_context(entries: &[HistoryEntry]) -> String {
    entries
        .iter()
        .map(|entry| format!("{}: {}", entry.role.prompt_label(), entry.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Append-only conversation log for one session.
///
/// # Example
///
/// ```rust
/// use brain_core::{ConversationHistory, Role};
///
/// let mut history = ConversationHistory::new();
/// history.append(Role::User, "summarize: fever and cough");
/// history.append(Role::System, "Patient has a fever and a cough.");
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.snapshot()[0].role, Role::User);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConversationHistory {
    entries: Vec<HistoryEntry>,
}

impl ConversationHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry at the end of the log.
    pub fn append(&mut self, role: Role, message: impl Into<String>) {
        self.entries.push(HistoryEntry {
            role,
            message: message.into(),
        });
    }

    /// Read-only copy of every entry, oldest first.
    pub fn snapshot(&self) -> Vec<HistoryEntry> {
        self.entries.clone()
    }

    /// Borrow the entries without copying.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// The last `limit` entries, oldest first. `None` returns everything.
    pub fn window(&self, limit: Option<usize>) -> &[HistoryEntry] {
        match limit {
            Some(limit) if limit < self.entries.len() => {
                &self.entries[self.entries.len() - limit..]
            }
            _ => &self.entries,
        }
    }

    /// Render the whole log as prompt context.
    pub fn render_as_prompt_context(&self) -> String {
        render_prompt_context(&self.entries)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

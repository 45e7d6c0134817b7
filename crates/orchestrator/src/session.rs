//! Per-conversation state: backend selection plus the history log.

use brain_core::{ConversationHistory, HistoryEntry, Role};
use tracing::info;

use crate::error::OrchestratorError;
use crate::registry::{ModelRegistry, ModelVersions, Selection};

/// One conversation with the router.
///
/// Owned by the caller and passed to `Orchestrator::process_command` for
/// every turn, so independent sessions never share a selection.
#[derive(Debug, Clone, Default)]
pub struct Session {
    registry: ModelRegistry,
    history: ConversationHistory,
}

impl Session {
    /// Create a session with the given default versions and nothing selected.
    pub fn new(versions: ModelVersions) -> Self {
        Self {
            registry: ModelRegistry::new(versions),
            history: ConversationHistory::new(),
        }
    }

    /// Select a backend. Returns `false` (and keeps the previous selection)
    /// if the name is not recognized.
    pub fn select_backend(&mut self, name: &str, version: Option<&str>) -> bool {
        self.try_select_backend(name, version).is_ok()
    }

    /// Select a backend, reporting why it failed.
    pub fn try_select_backend(
        &mut self,
        name: &str,
        version: Option<&str>,
    ) -> Result<Selection, OrchestratorError> {
        let selection = self.registry.select(name, version)?.clone();
        info!(backend = %selection.backend, model = %selection.version, "Backend selected");
        Ok(selection)
    }

    /// The active selection, if any.
    pub fn active(&self) -> Option<&Selection> {
        self.registry.get_active()
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// Read-only copy of the conversation, oldest first.
    pub fn get_history(&self) -> Vec<HistoryEntry> {
        self.history.snapshot()
    }

    /// Append one user entry and one system entry.
    pub(crate) fn record_turn(&mut self, command: &str, reply: &str) {
        self.history.append(Role::User, command);
        self.history.append(Role::System, reply);
    }
}

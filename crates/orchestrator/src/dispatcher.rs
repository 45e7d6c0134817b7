//! Dispatch of a resolved turn to the selected backend.

use std::collections::HashMap;
use std::sync::Arc;

use brain_core::{ArgumentBundle, Brain, BrainError, ChatRequest, HistoryEntry, Toolkit, ToolkitRequest};
use tracing::{debug, info, trace};
use vendor_brain::VendorKind;

use crate::actions::Action;
use crate::error::OrchestratorError;
use crate::registry::{Backend, Selection};
use crate::response::Response;

/// What the router understood from a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// A toolkit action with its extracted arguments.
    Structured { action: Action, args: ArgumentBundle },
    /// A conversational turn forwarded verbatim.
    Conversational,
}

/// One turn ready for dispatch.
#[derive(Debug, Clone)]
pub struct Turn {
    /// The raw command text.
    pub command: String,
    /// History preceding this turn, for chat backends.
    pub context: Vec<HistoryEntry>,
    pub intent: Intent,
}

impl Turn {
    pub fn conversational(command: impl Into<String>, context: Vec<HistoryEntry>) -> Self {
        Self {
            command: command.into(),
            context,
            intent: Intent::Conversational,
        }
    }

    pub fn structured(command: impl Into<String>, action: Action, args: ArgumentBundle) -> Self {
        Self {
            command: command.into(),
            context: Vec::new(),
            intent: Intent::Structured { action, args },
        }
    }
}

/// Maps a turn and a selection to a concrete collaborator call.
pub struct Dispatcher {
    toolkit: Arc<dyn Toolkit>,
    brains: HashMap<VendorKind, Arc<dyn Brain>>,
}

impl Dispatcher {
    pub fn new(toolkit: Arc<dyn Toolkit>) -> Self {
        Self {
            toolkit,
            brains: HashMap::new(),
        }
    }

    /// Register the chat brain for a vendor family, replacing any previous one.
    pub fn insert_brain(&mut self, kind: VendorKind, brain: Arc<dyn Brain>) {
        self.brains.insert(kind, brain);
    }

    /// Whether a brain is registered for `kind`.
    pub fn has_brain(&self, kind: VendorKind) -> bool {
        self.brains.contains_key(&kind)
    }

    /// Route a turn to the selected backend.
    pub async fn route(
        &self,
        selection: Option<&Selection>,
        turn: Turn,
    ) -> Result<Response, OrchestratorError> {
        let selection = selection.ok_or(OrchestratorError::NoBackendSelected)?;

        match selection.backend.vendor() {
            None => self.route_toolkit(&selection.version, turn).await,
            Some(kind) => self.route_external(kind, &selection.version, turn).await,
        }
    }

    async fn route_toolkit(&self, version: &str, turn: Turn) -> Result<Response, OrchestratorError> {
        let (action, args) = match turn.intent {
            Intent::Structured { action, args } => (action, args),
            Intent::Conversational => {
                return Err(OrchestratorError::UnrecognizedAction(turn.command));
            }
        };

        let operation = action.operation();
        if !self.toolkit.supports(operation) {
            return Err(OrchestratorError::UnsupportedAction(action.label().to_string()));
        }
        if let Some(field) = args.first_empty_field() {
            return Err(OrchestratorError::MissingField(field.to_string()));
        }

        info!(
            backend = %Backend::Toolkit,
            model = %version,
            action = %action,
            "Dispatching to toolkit"
        );
        let output = self
            .toolkit
            .invoke(ToolkitRequest::new(operation, version, args))
            .await?;
        trace!(output = ?output, "TOOLKIT_OUTPUT");

        Ok(output.into())
    }

    async fn route_external(
        &self,
        kind: VendorKind,
        version: &str,
        turn: Turn,
    ) -> Result<Response, OrchestratorError> {
        let brain = self.brains.get(&kind).ok_or_else(|| {
            BrainError::Configuration(format!(
                "{} is not configured (set {}_API_KEY)",
                kind.display_name(),
                kind.env_prefix()
            ))
        })?;

        info!(
            backend = %Backend::from(kind),
            model = %version,
            context_entries = turn.context.len(),
            "Forwarding to chat backend"
        );
        let request = ChatRequest::new(version, turn.command).with_history(turn.context);
        let reply = brain.send(request).await?;
        debug!(brain = brain.name(), reply_len = reply.len(), "Chat backend replied");

        Ok(Response::Text(reply))
    }
}

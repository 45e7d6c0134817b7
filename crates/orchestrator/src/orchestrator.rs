//! Main orchestrator that turns one command into one reply.

use std::sync::Arc;

use brain_core::{Brain, Classifier, CredentialStore, EnvCredentials, HistoryEntry, Role, Toolkit};
use toolkit_client::{HttpToolkit, ZeroShotClassifier};
use tracing::{debug, info, warn};
use vendor_brain::{build_brain, VendorConfig, VendorKind};

use crate::actions::Action;
use crate::classifier::{ActionClassifier, TopicDetector};
use crate::config::{OrchestratorConfig, RoutingPolicy};
use crate::dispatcher::{Dispatcher, Turn};
use crate::error::OrchestratorError;
use crate::extractor::ArgumentExtractor;
use crate::registry::{Backend, Selection};
use crate::response::Response;
use crate::session::Session;

/// Help text shown when the user asks for help. The per-action examples are
/// appended by [`help_text`].
pub const HELP_TEXT: &str = r#"Send a command in plain language, e.g. "summarize: <text>".

Commands:
• "help" - Show this message
• "show history" - Show the conversation so far
• "switch to <backend> [version]" - Select a backend: toolkit, chatgpt, claude, gemini, llama (or 1-4)
  Also accepted: "switch model to", "change to", "use model"

With the toolkit selected, commands are resolved to one of these actions:"#;

/// Prefixes that introduce a backend switch, longest first.
const SWITCH_PREFIXES: &[&str] = &[
    "switch model to",
    "change model to",
    "use model",
    "switch to",
    "change to",
];

/// Full help text, including an example for every action.
pub fn help_text() -> String {
    let mut text = HELP_TEXT.to_string();
    for (i, action) in Action::ALL.iter().enumerate() {
        text.push_str(&format!("\n{}. {}\n   {}", i + 1, action.title(), action.example()));
    }
    text
}

/// Commands handled before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
enum MetaCommand {
    Help,
    ShowHistory,
    SwitchModel {
        name: String,
        version: Option<String>,
    },
}

fn parse_meta(command: &str) -> Option<MetaCommand> {
    let collapsed = command.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.eq_ignore_ascii_case("help") {
        return Some(MetaCommand::Help);
    }
    if collapsed.eq_ignore_ascii_case("show history") {
        return Some(MetaCommand::ShowHistory);
    }

    for prefix in SWITCH_PREFIXES {
        let matches_prefix = collapsed
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix));
        if !matches_prefix {
            continue;
        }

        let rest = &collapsed[prefix.len()..];
        if !rest.is_empty() && !rest.starts_with(' ') {
            continue;
        }

        let mut words = rest.split_whitespace();
        return Some(MetaCommand::SwitchModel {
            name: words.next().unwrap_or_default().to_string(),
            version: words.next().map(str::to_string),
        });
    }

    None
}

fn render_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "Conversation history is empty.".to_string();
    }

    let mut text = String::from("Conversation History:");
    for entry in entries {
        let speaker = match entry.role {
            Role::User => "User",
            Role::System => "System",
        };
        text.push_str(&format!("\n{}: {}", speaker, entry.message));
    }
    text
}

/// Main orchestrator that resolves and dispatches commands.
///
/// The orchestrator:
/// - Handles meta commands (help, history, backend switching)
/// - Picks the target backend according to the routing policy
/// - For the toolkit, classifies the action and extracts its arguments
/// - For chat backends, forwards the raw command with prior history
/// - Records every turn in the session history, failures included
///
/// It holds no per-conversation state; that lives in [`Session`].
pub struct Orchestrator {
    config: OrchestratorConfig,
    actions: ActionClassifier,
    topics: TopicDetector,
    extractor: ArgumentExtractor,
    dispatcher: Dispatcher,
}

impl Orchestrator {
    /// Create an orchestrator with the given collaborators and no chat
    /// backends. Add those with [`Orchestrator::with_brain`].
    ///
    /// The same classifier serves action fallback and topic detection.
    pub fn new(
        config: OrchestratorConfig,
        toolkit: Arc<dyn Toolkit>,
        classifier: Arc<dyn Classifier>,
    ) -> Result<Self, OrchestratorError> {
        let actions = ActionClassifier::new(classifier.clone())?;
        let topics = TopicDetector::new(classifier);
        let extractor =
            ArgumentExtractor::new(&config.default_language, config.supported_languages.clone())?;

        Ok(Self {
            config,
            actions,
            topics,
            extractor,
            dispatcher: Dispatcher::new(toolkit),
        })
    }

    /// Register the chat brain for a vendor family.
    pub fn with_brain(mut self, kind: VendorKind, brain: Arc<dyn Brain>) -> Self {
        self.dispatcher.insert_brain(kind, brain);
        self
    }

    /// Build a chat brain for every family that has a key in `credentials`.
    ///
    /// Families without a key are skipped; selecting one later fails the
    /// turn with a configuration error instead.
    pub fn with_vendor_credentials(mut self, credentials: &dyn CredentialStore) -> Self {
        for kind in VendorKind::ALL {
            match VendorConfig::from_credentials(kind, credentials).and_then(build_brain) {
                Ok(brain) => {
                    info!("{} backend configured", kind.display_name());
                    self.dispatcher.insert_brain(kind, brain);
                }
                Err(e) => warn!("{} backend unavailable: {}", kind.display_name(), e),
            }
        }
        self
    }

    /// Create an orchestrator from environment variables.
    ///
    /// This creates the toolkit client, the zero-shot classifier and one
    /// chat brain per vendor whose API key is set.
    pub fn from_env() -> Result<Self, OrchestratorError> {
        let config = OrchestratorConfig::from_env()?;

        let toolkit = HttpToolkit::from_env()
            .map_err(|e| OrchestratorError::Configuration(format!("Toolkit init error: {}", e)))?;
        let classifier = ZeroShotClassifier::from_env()
            .map_err(|e| OrchestratorError::Configuration(format!("Classifier init error: {}", e)))?;

        Ok(Self::new(config, Arc::new(toolkit), Arc::new(classifier))?
            .with_vendor_credentials(&EnvCredentials))
    }

    /// Start a new session with nothing selected.
    pub fn new_session(&self) -> Session {
        Session::new(self.config.versions.clone())
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Process one command and return the rendered reply.
    ///
    /// Never fails: errors are rendered into the reply. Every call appends
    /// exactly one user and one system entry to the session history.
    pub async fn process_command(&self, session: &mut Session, command: &str) -> String {
        self.respond(session, command).await.render()
    }

    /// Like [`Orchestrator::process_command`], but returns the structured
    /// response.
    pub async fn respond(&self, session: &mut Session, command: &str) -> Response {
        info!(command_len = command.len(), "Processing command");

        let response = match self.handle(session, command).await {
            Ok(response) => response,
            Err(e) => {
                warn!(kind = ?e.kind(), "Command failed: {}", e);
                Response::from(&e)
            }
        };

        session.record_turn(command, &response.render());
        response
    }

    async fn handle(&self, session: &mut Session, command: &str) -> Result<Response, OrchestratorError> {
        let command = command.trim();
        if command.is_empty() {
            return Err(OrchestratorError::MissingField("command".to_string()));
        }

        if let Some(meta) = parse_meta(command) {
            debug!(meta = ?meta, "Meta command");
            return self.execute_meta(session, meta);
        }

        let target = self.resolve_target(session, command).await?;

        let turn = match &target {
            Some(Selection {
                backend: Backend::Toolkit,
                ..
            }) => {
                let action = self.actions.identify_action(command).await?;
                let args = self.extractor.extract(command, action)?;
                Turn::structured(command, action, args)
            }
            _ => {
                let context = session
                    .history()
                    .window(self.config.max_context_entries)
                    .to_vec();
                Turn::conversational(command, context)
            }
        };

        self.dispatcher.route(target.as_ref(), turn).await
    }

    /// Pick the backend for this command according to the routing policy.
    async fn resolve_target(
        &self,
        session: &Session,
        command: &str,
    ) -> Result<Option<Selection>, OrchestratorError> {
        match self.config.policy {
            RoutingPolicy::ExplicitSelection => Ok(session.active().cloned()),
            RoutingPolicy::TopicGated => {
                let topic = self.topics.detect(command).await?;
                info!(topic = %topic.label, in_domain = topic.in_domain, "Topic gate");
                if topic.in_domain {
                    Ok(Some(session.registry().toolkit_selection()))
                } else {
                    Ok(session.active().cloned())
                }
            }
        }
    }

    fn execute_meta(&self, session: &mut Session, meta: MetaCommand) -> Result<Response, OrchestratorError> {
        match meta {
            MetaCommand::Help => Ok(Response::Text(help_text())),
            MetaCommand::ShowHistory => Ok(Response::Text(render_history(
                session.history().entries(),
            ))),
            MetaCommand::SwitchModel { name, version } => {
                let selection = session.try_select_backend(&name, version.as_deref())?;
                if let Some(kind) = selection.backend.vendor() {
                    if !self.dispatcher.has_brain(kind) {
                        warn!("{} selected but no API key is configured", kind.display_name());
                    }
                }
                Ok(Response::Text(format!("Switched to {}.", selection)))
            }
        }
    }
}

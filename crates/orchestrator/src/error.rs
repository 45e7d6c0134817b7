//! Error types for command routing.

use brain_core::BrainError;
use thiserror::Error;

use crate::syntax::ParseError;

/// Errors that can occur while handling one command.
///
/// None of these are fatal: `process_command` turns every one of them into
/// a reply and the session carries on.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// The classifier produced a label outside the action set.
    #[error("unrecognized action: {0}")]
    UnrecognizedAction(String),

    /// A required argument is absent or empty.
    #[error("missing required field `{0}`")]
    MissingField(String),

    /// An argument is present but cannot be interpreted.
    #[error("malformed argument `{field}`: {reason}")]
    MalformedArgument { field: String, reason: String },

    /// Backend name not recognized.
    #[error("invalid backend `{0}`: choose toolkit, chatgpt, claude, gemini or llama (or 1, 2, 3, 4)")]
    InvalidBackend(String),

    /// Dispatch attempted before any backend was selected.
    #[error("no backend selected: use `switch to <backend>` first")]
    NoBackendSelected,

    /// Translation target outside the supported set.
    #[error("unsupported language `{language}` (supported: {supported})")]
    UnsupportedLanguage { language: String, supported: String },

    /// The toolkit has no operation for the action.
    #[error("action `{0}` is not supported by the toolkit")]
    UnsupportedAction(String),

    /// Classifier, toolkit or vendor call failed.
    #[error("collaborator failed: {0}")]
    Collaborator(#[from] BrainError),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl OrchestratorError {
    /// The closed error category, as carried by `Response::Error`.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnrecognizedAction(_) => ErrorKind::UnrecognizedAction,
            Self::MissingField(_) => ErrorKind::MissingField,
            Self::MalformedArgument { .. } => ErrorKind::MalformedArgument,
            Self::InvalidBackend(_) => ErrorKind::InvalidBackend,
            Self::NoBackendSelected => ErrorKind::NoBackendSelected,
            Self::UnsupportedLanguage { .. } => ErrorKind::UnsupportedLanguage,
            Self::UnsupportedAction(_) => ErrorKind::UnsupportedAction,
            Self::Collaborator(_) => ErrorKind::CollaboratorFailure,
            Self::Configuration(_) => ErrorKind::Configuration,
        }
    }

    /// Shorthand for a malformed-argument error.
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<ParseError> for OrchestratorError {
    fn from(err: ParseError) -> Self {
        Self::malformed(err.key(), err.to_string())
    }
}

impl From<regex::Error> for OrchestratorError {
    fn from(err: regex::Error) -> Self {
        Self::Configuration(format!("invalid pattern: {}", err))
    }
}

/// Category of a failed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnrecognizedAction,
    MissingField,
    MalformedArgument,
    InvalidBackend,
    NoBackendSelected,
    UnsupportedLanguage,
    UnsupportedAction,
    CollaboratorFailure,
    Configuration,
}

//! Error types for collaborator calls.

use thiserror::Error;

/// Errors reported by a collaborator (chat backend, classifier, toolkit).
#[derive(Debug, Error)]
pub enum BrainError {
    /// The collaborator is misconfigured (missing key, bad URL, ...).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request never reached the collaborator or the connection dropped.
    #[error("network error: {0}")]
    Network(String),

    /// The collaborator answered with an error.
    #[error("processing failed: {0}")]
    ProcessingFailed(String),

    /// The collaborator answered but the payload could not be understood.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The collaborator is temporarily unavailable.
    #[error("unavailable: {0}")]
    Unavailable(String),
}

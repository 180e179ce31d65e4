//! Error types for the signal engine

use thiserror::Error;

/// Errors surfaced by engine operations
///
/// Most collaborator failures never reach the caller: components degrade to
/// a fallback value instead. Only the variants documented on each operation
/// are returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    /// A collaborator call (search, detail fetch, probe) failed
    #[error("network failure: {0}")]
    Network(String),

    /// Similarity search produced nothing to rank
    #[error("no candidate repositories found")]
    NoCandidates,

    /// Remote content could not be parsed
    #[error("parse failure: {0}")]
    Parse(String),

    /// A repository identity cannot be resolved to anything comparable
    #[error("repository cannot be resolved: {0}")]
    Unresolvable(String),
}

impl From<serde_json::Error> for SignalError {
    fn from(e: serde_json::Error) -> Self {
        SignalError::Parse(e.to_string())
    }
}

/// Result type alias for engine operations
pub type SignalResult<T> = Result<T, SignalError>;

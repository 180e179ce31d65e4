//! Error types for gh CLI operations

use repo_signals::SignalError;
use thiserror::Error;

/// Errors that can occur when executing `gh api`
#[derive(Error, Debug)]
pub enum GhError {
    /// The API answered with an HTTP error status
    #[error("GitHub API returned HTTP {status}: {message}")]
    Http {
        /// Status parsed from gh's stderr (`HTTP 404`)
        status: u16,
        message: String,
    },

    /// The gh command failed without a recognizable HTTP status
    #[error("gh command failed (exit code {code}): {stderr}")]
    CommandFailed { code: i32, stderr: String },

    /// Failed to spawn the gh process
    #[error("failed to spawn gh process: {0}")]
    SpawnError(#[from] std::io::Error),

    /// Failed to parse JSON output from gh
    #[error("failed to parse gh JSON output: {0}")]
    ParseError(#[from] serde_json::Error),

    /// gh CLI is not installed or not in PATH
    #[error("gh CLI not found - ensure gh is installed and in PATH")]
    NotFound,

    /// gh CLI is not authenticated
    #[error("gh CLI not authenticated - run 'gh auth login' first")]
    NotAuthenticated,
}

impl GhError {
    /// HTTP status of the failed request, if gh reported one
    pub fn status(&self) -> Option<u16> {
        match self {
            GhError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<GhError> for SignalError {
    fn from(e: GhError) -> Self {
        match e {
            GhError::ParseError(e) => SignalError::Parse(e.to_string()),
            other => SignalError::Network(other.to_string()),
        }
    }
}

/// Result type alias for gh operations
pub type GhResult<T> = Result<T, GhError>;

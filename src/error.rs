//! Error types for ghsync

use thiserror::Error;

/// Result alias using the crate [`enum@Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the push pipeline and its collaborators
#[derive(Debug, Error)]
pub enum Error {
    /// Remote object does not exist (HTTP 404)
    #[error("not found: {0}")]
    NotFound(String),

    /// Content did not expose the expected capability
    #[error("type mismatch: want {expected}, got {actual}")]
    TypeMismatch {
        /// Capability the operation required
        expected: &'static str,
        /// Variant that was supplied
        actual: &'static str,
    },

    /// Non-submodule content reached the pipeline
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// Traceback walked the base branch without finding a usable commit
    #[error("no appropriate base commit found within {limit} commits")]
    BaseCommitNotFound {
        /// Iteration bound that was exhausted
        limit: usize,
    },

    /// GitHub API call failed (transport, auth, rate limit)
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// No usable credentials
    #[error("authentication error: {0}")]
    Auth(String),

    /// Malformed slug or remote URL
    #[error("parse error: {0}")]
    Parse(String),

    /// Origin build metadata could not be collected
    #[error("origin metadata error: {0}")]
    Metadata(String),

    /// Local git invocation failed
    #[error("git error: {0}")]
    Git(String),

    /// Requested mode is not supported
    #[error("{0}")]
    Unsupported(String),

    /// Interrupted before the pipeline finished
    #[error("cancelled")]
    Cancelled,
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. } if source.status_code.as_u16() == 404 => {
                Self::NotFound(source.message.clone())
            }
            octocrab::Error::GitHub { source, .. } => Self::GitHubApi(format!(
                "{} ({})",
                source.message,
                source.status_code.as_u16()
            )),
            _ => Self::GitHubApi(err.to_string()),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Git(err.to_string())
    }
}

//! Authentication for GitHub
//!
//! Supports environment variables (the usual CI setup) and the gh CLI.

mod github;

pub use github::{get_github_auth, GitHubAuthConfig};

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from environment variable
    EnvVar,
    /// Token from the gh CLI
    Cli,
}

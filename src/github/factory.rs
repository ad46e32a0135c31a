//! GitHub client factory
//!
//! Creates the API client from the ambient authentication setup.

use crate::auth::get_github_auth;
use crate::error::Result;
use crate::github::OctocrabGitHub;
use std::env;
use tracing::debug;

/// Create an authenticated GitHub client
///
/// `GH_HOST` selects a GitHub Enterprise instance.
pub async fn create_github_client() -> Result<OctocrabGitHub> {
    let auth = get_github_auth().await?;
    let host = env::var("GH_HOST").ok().filter(|h| h != "github.com");
    debug!(source = ?auth.source, host = ?host, "creating GitHub client");
    OctocrabGitHub::new(&auth.token, host.as_deref())
}

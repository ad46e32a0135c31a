//! Origin build metadata
//!
//! Describes the build whose commit gets propagated: the CI run, or the
//! local checkout when not running in CI.

mod ci;
mod local;

pub use ci::{CiProvider, Lookup, PROVIDERS};
pub use local::{configured_identity, parse_remote_url};

use crate::error::Result;
use serde::Serialize;
use std::env;
use std::path::Path;
use tracing::debug;

/// Prefix of head branches created by ghsync
pub const HEAD_BRANCH_PREFIX: &str = "ghsync";

/// Where the origin metadata came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CiKind {
    /// Local git checkout, outside CI
    Local,
    /// Travis CI
    Travis,
    /// CircleCI
    CircleCi,
    /// GitHub Actions
    GitHubActions,
}

/// Immutable snapshot of the triggering build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OriginMetadata {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Commit the build ran on
    pub sha: String,
    /// Web URL of the repository, base of permalinks
    pub url: String,
    /// Pull request number, 0 when not a PR build
    pub pr_number: u64,
    /// Branch the build ran on, if known
    pub branch: Option<String>,
    /// Provider that produced this record
    pub ci: CiKind,
}

impl OriginMetadata {
    /// `owner/repo`
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Permalink of the origin commit
    pub fn commit_url(&self) -> String {
        format!("{}/commit/{}", self.url, self.sha)
    }

    /// Permalink of the origin pull request
    pub fn pr_url(&self) -> String {
        format!("{}/pull/{}", self.url, self.pr_number)
    }

    /// Whether the build belongs to a pull request
    pub const fn is_pr(&self) -> bool {
        self.pr_number > 0
    }

    /// Abbreviated origin SHA (7 characters)
    pub fn short_sha(&self) -> &str {
        self.sha.get(..7).unwrap_or(&self.sha)
    }

    /// Head branch name used when none is given explicitly
    ///
    /// `ghsync/<owner>/<repo>/pull/<n>` for PR builds, otherwise
    /// `ghsync/<owner>/<repo>/branch/<branch>`.
    pub fn default_head_branch(&self) -> Option<String> {
        let suffix = if self.is_pr() {
            format!("pull/{}", self.pr_number)
        } else {
            format!("branch/{}", self.branch.as_deref()?)
        };
        Some(format!(
            "{HEAD_BRANCH_PREFIX}/{}/{}/{suffix}",
            self.owner, self.repo
        ))
    }
}

/// Build origin metadata from the current environment
///
/// With `CI=true` the first matching provider in [`PROVIDERS`] wins;
/// outside CI, or in an unrecognized CI, the local checkout is inspected.
pub async fn build_metadata() -> Result<OriginMetadata> {
    let lookup = |key: &str| env::var(key).ok();
    collect(&lookup, Path::new(".")).await
}

async fn collect(lookup: Lookup<'_>, checkout: &Path) -> Result<OriginMetadata> {
    if lookup("CI").as_deref() == Some("true") {
        if let Some(metadata) = ci::detect(lookup)? {
            debug!(?metadata, "origin metadata from CI environment");
            return Ok(metadata);
        }
        debug!("unrecognized CI provider, inspecting local checkout");
    }

    let metadata = local::inspect(checkout).await?;
    debug!(?metadata, "origin metadata from local checkout");
    Ok(metadata)
}

//! Push a submodule pointer into a target repository
//!
//! Ties the pieces together:
//! 1. Open the target repository and resolve the head reference
//! 2. Fetch the submodule entry at the target path
//! 3. Update it locally to the origin sha
//! 4. Commit and reconcile the pull request, unless nothing changed

use crate::content::Content;
use crate::error::Result;
use crate::github::GitHubApi;
use crate::origin::OriginMetadata;
use crate::repository::{ContentRepository, UpdateOutcome};
use crate::types::Identity;
use tracing::info;

/// Where and what to push
#[derive(Debug, Clone)]
pub struct PushTarget {
    /// Target repository, `owner/repo`
    pub slug: String,
    /// Branch the head branch is based on and the PR targets
    pub base: String,
    /// Branch that receives the update commit
    pub head: String,
    /// Submodule path in the target repository
    pub path: String,
    /// Explicit commit identity
    pub author: Option<Identity>,
}

/// Result of a push
#[derive(Debug, Clone)]
pub enum PushReport {
    /// Target already pins the origin sha
    Unchanged {
        /// Submodule path
        path: String,
        /// Pinned sha
        sha: String,
    },
    /// A commit was pushed to the head branch
    Updated(UpdateOutcome),
}

/// Propagate the origin sha into the submodule at `target.path`
pub async fn push(
    api: &dyn GitHubApi,
    origin: &OriginMetadata,
    target: &PushTarget,
) -> Result<PushReport> {
    let mut repository =
        ContentRepository::create(api, &target.slug, &target.base, &target.head, origin)
            .await?
            .with_author(target.author.clone());

    let mut content = repository.get(&target.path).await?;
    let desired = Content::local_submodule(&origin.sha);

    if !content.update(&desired)? {
        info!(path = %target.path, sha = %origin.sha, "the content has not been updated");
        return Ok(PushReport::Unchanged {
            path: target.path.clone(),
            sha: origin.sha.clone(),
        });
    }

    let outcome = repository.update(&content).await?;
    Ok(PushReport::Updated(outcome))
}

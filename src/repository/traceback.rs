//! Base commit resolution
//!
//! The base branch may have moved on since the origin build ran, and its
//! tip can pin a submodule commit newer than the one being pushed. Walking
//! back along first parents finds the most recent commit whose pinned
//! commit is an ancestor of (or equal to) the desired one.

use crate::content::Content;
use crate::error::{Error, Result};
use crate::github::GitHubApi;
use crate::repository::ContentRepository;
use crate::types::Commit;
use tracing::debug;

/// Maximum number of commits inspected while resolving a base commit
pub const TRACEBACK_LIMIT: usize = 100;

/// Bounded first-parent walk over commit history
///
/// Each commit is fetched only when requested, so a walk that stops early
/// never touches older history.
pub struct CommitWalk<'a> {
    api: &'a dyn GitHubApi,
    owner: &'a str,
    repo: &'a str,
    next_sha: Option<String>,
    remaining: usize,
}

impl<'a> CommitWalk<'a> {
    /// Walk from `start` back through at most `limit` commits
    pub fn new(
        api: &'a dyn GitHubApi,
        owner: &'a str,
        repo: &'a str,
        start: impl Into<String>,
        limit: usize,
    ) -> Self {
        Self {
            api,
            owner,
            repo,
            next_sha: Some(start.into()),
            remaining: limit,
        }
    }

    /// Next commit of the walk, `None` once the bound or a root is reached
    pub async fn next(&mut self) -> Result<Option<Commit>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        let Some(sha) = self.next_sha.take() else {
            return Ok(None);
        };

        let commit = self.api.get_commit(self.owner, self.repo, &sha).await?;
        self.remaining -= 1;
        self.next_sha = commit.first_parent().map(ToString::to_string);
        Ok(Some(commit))
    }
}

impl ContentRepository<'_> {
    /// Find the commit of the base branch to build the update on
    ///
    /// Returns the newest commit whose submodule pointer at the content's
    /// path is not ahead of the desired pointer, compared in the origin
    /// repository.
    pub async fn resolve_base_commit(&self, content: &Content) -> Result<Commit> {
        let (path, desired) = match content {
            Content::RemoteSubmodule { path, sha } => (path.as_str(), sha.as_str()),
            other => return Err(Error::UnsupportedContentType(other.kind().to_string())),
        };

        let base_ref = self
            .api
            .get_ref(&self.owner, &self.repo, &format!("heads/{}", self.base))
            .await?;

        let mut walk = CommitWalk::new(
            self.api,
            &self.owner,
            &self.repo,
            base_ref.sha(),
            TRACEBACK_LIMIT,
        );

        while let Some(commit) = walk.next().await? {
            let pinned = self.fetch_submodule(path, &commit.sha).await?;
            let pinned_sha = pinned.submodule_sha().unwrap_or_default();

            let comparison = self
                .api
                .compare_commits(&self.origin.owner, &self.origin.repo, pinned_sha, desired)
                .await?;

            debug!(
                commit = %commit.sha,
                pinned = %pinned_sha,
                behind_by = comparison.behind_by,
                ahead_by = comparison.ahead_by,
                "traceback step"
            );

            if comparison.behind_by == 0 {
                return Ok(commit);
            }
        }

        Err(Error::BaseCommitNotFound {
            limit: TRACEBACK_LIMIT,
        })
    }
}

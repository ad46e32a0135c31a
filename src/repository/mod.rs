//! Content repository
//!
//! A view of one target repository, bound to a base branch and the head
//! branch that receives the update. The cached head reference is replaced
//! after every remote mutation that moves it; an instance is meant for a
//! single push and is not safe to share.

mod builder;
mod reconcile;
mod traceback;

pub use reconcile::PullRequestOutcome;
pub use traceback::{CommitWalk, TRACEBACK_LIMIT};

use crate::content::Content;
use crate::error::{Error, Result};
use crate::github::GitHubApi;
use crate::origin::OriginMetadata;
use crate::types::{Commit, Identity, Reference, RemoteContent};
use tracing::debug;

/// Result of a successful [`ContentRepository::update`]
#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    /// Commit the new commit was branched from
    pub base_commit: Commit,
    /// Newly created commit on the head branch
    pub commit: Commit,
    /// What happened to the pull request
    pub pull_request: PullRequestOutcome,
}

/// Target repository of a push
pub struct ContentRepository<'a> {
    api: &'a dyn GitHubApi,
    origin: &'a OriginMetadata,
    owner: String,
    repo: String,
    base: String,
    head: String,
    head_ref: Reference,
    author: Option<Identity>,
}

impl<'a> ContentRepository<'a> {
    /// Open `slug` (`owner/repo`) for pushing to `head`, based on `base`
    ///
    /// If `heads/<head>` does not exist yet, `heads/<base>` becomes the
    /// provisional head reference.
    pub async fn create(
        api: &'a dyn GitHubApi,
        slug: &str,
        base: &str,
        head: &str,
        origin: &'a OriginMetadata,
    ) -> Result<Self> {
        let (owner, repo) = split_slug(slug)?;

        let head_ref = match api.get_ref(&owner, &repo, &format!("heads/{head}")).await {
            Ok(reference) => reference,
            Err(Error::NotFound(_)) => {
                debug!(head, base, "head branch does not exist yet, using base");
                api.get_ref(&owner, &repo, &format!("heads/{base}")).await?
            }
            Err(e) => return Err(e),
        };

        debug!(reference = ?head_ref, "head reference was fetched");

        Ok(Self {
            api,
            origin,
            owner,
            repo,
            base: base.to_string(),
            head: head.to_string(),
            head_ref,
            author: None,
        })
    }

    /// Sign new commits as `author` instead of the authenticated user
    #[must_use]
    pub fn with_author(mut self, author: Option<Identity>) -> Self {
        self.author = author;
        self
    }

    /// Currently cached head reference
    pub const fn head_ref(&self) -> &Reference {
        &self.head_ref
    }

    /// Repository owner
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Fetch the content at `path` as of the cached head reference
    pub async fn get(&self, path: &str) -> Result<Content> {
        let content = self.fetch_submodule(path, self.head_ref.sha()).await?;
        debug!(?content, "target content was fetched");
        Ok(content)
    }

    /// Commit `content` to the head branch and reconcile the pull request
    ///
    /// Runs base-commit resolution, tree/commit/ref creation, and PR
    /// reconciliation in order. Steps are not transactional: a failure
    /// leaves whatever remote objects were already created.
    pub async fn update(&mut self, content: &Content) -> Result<UpdateOutcome> {
        let base_commit = self.resolve_base_commit(content).await?;
        self.ensure_head_ref(&base_commit).await?;
        let tree = self.create_tree(&base_commit, content).await?;
        let commit = self.create_commit(&base_commit, &tree).await?;
        let pull_request = self.reconcile_pull_request(content).await?;

        Ok(UpdateOutcome {
            base_commit,
            commit,
            pull_request,
        })
    }

    async fn fetch_submodule(&self, path: &str, git_ref: &str) -> Result<Content> {
        let entry = match self
            .api
            .get_content(&self.owner, &self.repo, path, git_ref)
            .await?
        {
            RemoteContent::Entry(entry) => entry,
            RemoteContent::Listing(_) => {
                return Err(Error::UnsupportedContentType("dir".to_string()));
            }
        };

        match Content::from_entry(entry)? {
            content @ Content::RemoteSubmodule { .. } => Ok(content),
            other => Err(Error::UnsupportedContentType(other.kind().to_string())),
        }
    }
}

fn split_slug(slug: &str) -> Result<(String, String)> {
    match slug.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(Error::Parse(format!(
            "invalid repository slug: {slug} (expected owner/repo)"
        ))),
    }
}

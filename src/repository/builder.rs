//! Tree, commit, and reference construction

use crate::content::Content;
use crate::error::{Error, Result};
use crate::repository::ContentRepository;
use crate::types::{Commit, Identity, NewCommit, Signature, Tree, TreeEntry};
use chrono::Utc;
use tracing::{debug, info};

impl ContentRepository<'_> {
    /// Create `heads/<head>` at the base commit unless the cached head
    /// reference already is the head branch
    pub(super) async fn ensure_head_ref(&mut self, base_commit: &Commit) -> Result<()> {
        if self.head_ref.short_name() == self.head {
            return Ok(());
        }

        let reference = self
            .api
            .create_ref(
                &self.owner,
                &self.repo,
                &format!("heads/{}", self.head),
                &base_commit.sha,
            )
            .await?;

        debug!(?reference, "new head reference was created");
        self.head_ref = reference;
        Ok(())
    }

    pub(super) async fn create_tree(&self, base_commit: &Commit, content: &Content) -> Result<Tree> {
        let entry = match content {
            Content::RemoteSubmodule { path, sha } => TreeEntry::gitlink(path, sha),
            other => return Err(Error::UnsupportedContentType(other.kind().to_string())),
        };

        let tree = self
            .api
            .create_tree(&self.owner, &self.repo, &base_commit.tree.sha, &[entry])
            .await?;

        debug!(?tree, "new tree was created");
        Ok(tree)
    }

    /// Commit `tree` on top of `base_commit` and force-move the head
    /// reference to it
    pub(super) async fn create_commit(&mut self, base_commit: &Commit, tree: &Tree) -> Result<Commit> {
        let identity = self.resolve_identity().await?;
        let signature = Signature::new(&identity, Utc::now());

        let new_commit = NewCommit {
            message: self.commit_message(),
            tree: tree.sha.clone(),
            parents: vec![base_commit.sha.clone()],
            author: signature.clone(),
            committer: signature,
        };

        let commit = self
            .api
            .create_commit(&self.owner, &self.repo, &new_commit)
            .await?;

        let reference = self.head_ref.name.trim_start_matches("refs/").to_string();
        self.head_ref = self
            .api
            .update_ref(&self.owner, &self.repo, &reference, &commit.sha, true)
            .await?;

        info!(
            sha = %commit.sha,
            html_url = commit.html_url.as_deref().unwrap_or_default(),
            message = %new_commit.message,
            "a new commit was created"
        );

        Ok(commit)
    }

    /// Message of the update commit
    pub fn commit_message(&self) -> String {
        format!(
            "Use {}@{}\n\ncommit: {}",
            self.origin.slug(),
            self.origin.short_sha(),
            self.origin.commit_url()
        )
    }

    async fn resolve_identity(&self) -> Result<Identity> {
        if let Some(author) = &self.author {
            return Ok(author.clone());
        }
        self.api.authenticated_identity().await
    }
}

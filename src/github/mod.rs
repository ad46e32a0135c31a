//! GitHub API access
//!
//! The push pipeline talks to GitHub only through [`GitHubApi`], so the
//! octocrab client can be swapped for a mock in tests.

mod client;
mod factory;

pub use client::OctocrabGitHub;
pub use factory::create_github_client;

use crate::error::Result;
use crate::types::{
    Commit, Comparison, Identity, NewCommit, NewPullRequest, PullRequest, Reference,
    RemoteContent, Tree, TreeEntry,
};
use async_trait::async_trait;

/// Git data, contents, and pull request operations on GitHub
///
/// Reference names are given without the `refs/` prefix, e.g. `heads/master`.
/// A missing object is reported as [`crate::error::Error::NotFound`].
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Look up a reference
    async fn get_ref(&self, owner: &str, repo: &str, reference: &str) -> Result<Reference>;

    /// Create a reference pointing at `sha`
    async fn create_ref(
        &self,
        owner: &str,
        repo: &str,
        reference: &str,
        sha: &str,
    ) -> Result<Reference>;

    /// Fetch a commit object
    async fn get_commit(&self, owner: &str, repo: &str, sha: &str) -> Result<Commit>;

    /// Compare two commits (`base...head`)
    async fn compare_commits(
        &self,
        owner: &str,
        repo: &str,
        base: &str,
        head: &str,
    ) -> Result<Comparison>;

    /// Fetch the content at `path` as of `git_ref` (a SHA or ref name)
    async fn get_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> Result<RemoteContent>;

    /// Create a tree on top of `base_tree`
    async fn create_tree(
        &self,
        owner: &str,
        repo: &str,
        base_tree: &str,
        entries: &[TreeEntry],
    ) -> Result<Tree>;

    /// Create a commit object
    async fn create_commit(&self, owner: &str, repo: &str, commit: &NewCommit) -> Result<Commit>;

    /// Move a reference to `sha`
    async fn update_ref(
        &self,
        owner: &str,
        repo: &str,
        reference: &str,
        sha: &str,
        force: bool,
    ) -> Result<Reference>;

    /// List open pull requests whose head is `head` (`owner:branch`)
    async fn list_open_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        head: &str,
    ) -> Result<Vec<PullRequest>>;

    /// Open a pull request
    async fn create_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pull: &NewPullRequest,
    ) -> Result<PullRequest>;

    /// Comment on an issue or pull request
    async fn create_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        body: &str,
    ) -> Result<()>;

    /// Identity of the authenticated caller
    async fn authenticated_identity(&self) -> Result<Identity>;
}

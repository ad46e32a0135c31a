//! Core types for ghsync
//!
//! Wire-level shapes of the GitHub git data, contents, and pulls APIs,
//! trimmed to the fields the push pipeline reads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix of fully-qualified branch references
pub const HEADS_PREFIX: &str = "refs/heads/";

/// Git file mode of a gitlink tree entry
pub const GITLINK_MODE: &str = "160000";

/// A git reference (`refs/heads/...`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reference {
    /// Fully-qualified name, e.g. `refs/heads/master`
    #[serde(rename = "ref")]
    pub name: String,
    /// Object the reference points at
    pub object: GitObject,
}

impl Reference {
    /// Branch name without the `refs/heads/` prefix
    pub fn short_name(&self) -> &str {
        self.name.strip_prefix(HEADS_PREFIX).unwrap_or(&self.name)
    }

    /// SHA of the referenced object
    pub fn sha(&self) -> &str {
        &self.object.sha
    }
}

/// Object pointed to by a reference
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GitObject {
    /// Object SHA
    pub sha: String,
    /// Object type (`commit`, `tag`, ...)
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// A `{sha}` pointer as returned for trees and parents
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShaRef {
    /// Object SHA
    pub sha: String,
}

/// A git commit object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Commit {
    /// Commit SHA
    pub sha: String,
    /// Root tree of the commit
    pub tree: ShaRef,
    /// Parent commits, first parent first
    #[serde(default)]
    pub parents: Vec<ShaRef>,
    /// Commit message
    #[serde(default)]
    pub message: String,
    /// Web URL of the commit
    #[serde(default)]
    pub html_url: Option<String>,
}

impl Commit {
    /// SHA of the first parent, if any
    pub fn first_parent(&self) -> Option<&str> {
        self.parents.first().map(|p| p.sha.as_str())
    }
}

/// Result of a commit-range comparison
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comparison {
    /// Commits in base that are not in head
    pub behind_by: u64,
    /// Commits in head that are not in base
    pub ahead_by: u64,
}

/// One entry of the contents API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentEntry {
    /// Reported type: `submodule`, `file`, `symlink`, `dir`
    #[serde(rename = "type")]
    pub kind: String,
    /// Repository-relative path
    pub path: String,
    /// Blob SHA, or the pinned commit SHA for submodules
    pub sha: String,
}

/// Response of the contents API for a path
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RemoteContent {
    /// The path is a directory
    Listing(Vec<ContentEntry>),
    /// The path is a single entry
    Entry(ContentEntry),
}

/// A tree entry to write with the git trees API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TreeEntry {
    /// Repository-relative path
    pub path: String,
    /// File mode, e.g. `160000` for gitlinks
    pub mode: String,
    /// Object type (`commit` for gitlinks)
    #[serde(rename = "type")]
    pub kind: String,
    /// Target object SHA
    pub sha: String,
}

impl TreeEntry {
    /// Gitlink entry pinning `path` to commit `sha`
    pub fn gitlink(path: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: GITLINK_MODE.to_string(),
            kind: "commit".to_string(),
            sha: sha.into(),
        }
    }
}

/// A created tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tree {
    /// Tree SHA
    pub sha: String,
}

/// Commit author/committer identity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
}

/// Signature attached to a new commit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Signature {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Authoring timestamp
    pub date: DateTime<Utc>,
}

impl Signature {
    /// Sign as `identity` at `date`
    pub fn new(identity: &Identity, date: DateTime<Utc>) -> Self {
        Self {
            name: identity.name.clone(),
            email: identity.email.clone(),
            date,
        }
    }
}

/// Payload for creating a commit object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewCommit {
    /// Commit message
    pub message: String,
    /// Root tree SHA
    pub tree: String,
    /// Parent commit SHAs
    pub parents: Vec<String>,
    /// Author signature
    pub author: Signature,
    /// Committer signature
    pub committer: Signature,
}

/// A pull request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Web URL for the PR
    pub html_url: String,
    /// Base branch name
    pub base_ref: String,
    /// Head branch name
    pub head_ref: String,
    /// PR title
    pub title: String,
}

/// Payload for opening a pull request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewPullRequest {
    /// Branch to merge into
    pub base: String,
    /// Branch with the changes
    pub head: String,
    /// PR title
    pub title: String,
    /// PR description
    pub body: String,
}

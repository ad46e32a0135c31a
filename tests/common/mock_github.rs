//! Mock GitHub API for testing
//!
//! These are test utilities - not all may be used by every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use ghsync::error::{Error, Result};
use ghsync::github::GitHubApi;
use ghsync::types::{
    Commit, Comparison, GitObject, Identity, NewCommit, NewPullRequest, PullRequest, Reference,
    RemoteContent, ShaRef, Tree, TreeEntry,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Call record for `create_ref`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRefCall {
    pub reference: String,
    pub sha: String,
}

/// Call record for `compare_commits`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareCall {
    pub owner: String,
    pub repo: String,
    pub base: String,
    pub head: String,
}

/// Call record for `get_content`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetContentCall {
    pub path: String,
    pub git_ref: String,
}

/// Call record for `create_tree`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTreeCall {
    pub base_tree: String,
    pub entries: Vec<TreeEntry>,
}

/// Call record for `update_ref`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRefCall {
    pub reference: String,
    pub sha: String,
    pub force: bool,
}

/// Call record for `create_issue_comment`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentCall {
    pub owner: String,
    pub repo: String,
    pub number: u64,
    pub body: String,
}

/// In-memory GitHub for pipeline tests
///
/// Holds a tiny object graph (refs, commits, contents per commit) plus
/// canned comparisons and open PRs. Every call is recorded, and selected
/// operations can be made to fail.
pub struct MockGitHub {
    identity: Identity,
    next_id: AtomicU64,
    next_pr_number: AtomicU64,
    refs: Mutex<HashMap<String, Reference>>,
    commits: Mutex<HashMap<String, Commit>>,
    contents: Mutex<HashMap<(String, String), RemoteContent>>,
    comparisons: Mutex<HashMap<(String, String), Comparison>>,
    open_prs: Mutex<HashMap<String, Vec<PullRequest>>>,
    // Call tracking
    get_ref_calls: Mutex<Vec<String>>,
    create_ref_calls: Mutex<Vec<CreateRefCall>>,
    get_commit_calls: Mutex<Vec<String>>,
    compare_calls: Mutex<Vec<CompareCall>>,
    get_content_calls: Mutex<Vec<GetContentCall>>,
    create_tree_calls: Mutex<Vec<CreateTreeCall>>,
    create_commit_calls: Mutex<Vec<NewCommit>>,
    update_ref_calls: Mutex<Vec<UpdateRefCall>>,
    list_pr_calls: Mutex<Vec<String>>,
    create_pr_calls: Mutex<Vec<NewPullRequest>>,
    comment_calls: Mutex<Vec<CommentCall>>,
    identity_calls: AtomicUsize,
    // Error injection
    error_on_get_ref: Mutex<HashMap<String, String>>,
    error_on_comment: Mutex<Option<String>>,
}

impl Default for MockGitHub {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGitHub {
    pub fn new() -> Self {
        Self {
            identity: Identity {
                name: "Sync Bot".to_string(),
                email: "bot@example.com".to_string(),
            },
            next_id: AtomicU64::new(1),
            next_pr_number: AtomicU64::new(100),
            refs: Mutex::new(HashMap::new()),
            commits: Mutex::new(HashMap::new()),
            contents: Mutex::new(HashMap::new()),
            comparisons: Mutex::new(HashMap::new()),
            open_prs: Mutex::new(HashMap::new()),
            get_ref_calls: Mutex::new(Vec::new()),
            create_ref_calls: Mutex::new(Vec::new()),
            get_commit_calls: Mutex::new(Vec::new()),
            compare_calls: Mutex::new(Vec::new()),
            get_content_calls: Mutex::new(Vec::new()),
            create_tree_calls: Mutex::new(Vec::new()),
            create_commit_calls: Mutex::new(Vec::new()),
            update_ref_calls: Mutex::new(Vec::new()),
            list_pr_calls: Mutex::new(Vec::new()),
            create_pr_calls: Mutex::new(Vec::new()),
            comment_calls: Mutex::new(Vec::new()),
            identity_calls: AtomicUsize::new(0),
            error_on_get_ref: Mutex::new(HashMap::new()),
            error_on_comment: Mutex::new(None),
        }
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    // === Setup methods ===

    /// Point `heads/<branch>` at `sha`
    pub fn set_branch(&self, branch: &str, sha: &str) {
        self.refs
            .lock()
            .unwrap()
            .insert(format!("heads/{branch}"), reference(&format!("heads/{branch}"), sha));
    }

    /// Add a commit object
    pub fn add_commit(&self, sha: &str, tree: &str, parent: Option<&str>) {
        self.commits.lock().unwrap().insert(
            sha.to_string(),
            Commit {
                sha: sha.to_string(),
                tree: ShaRef {
                    sha: tree.to_string(),
                },
                parents: parent
                    .map(|p| ShaRef { sha: p.to_string() })
                    .into_iter()
                    .collect(),
                message: format!("commit {sha}"),
                html_url: None,
            },
        );
    }

    /// Content returned for `path` as of `git_ref`
    pub fn set_content(&self, git_ref: &str, path: &str, content: RemoteContent) {
        self.contents
            .lock()
            .unwrap()
            .insert((git_ref.to_string(), path.to_string()), content);
    }

    /// Comparison returned for `base...head`
    pub fn set_comparison(&self, base: &str, head: &str, behind_by: u64, ahead_by: u64) {
        self.comparisons.lock().unwrap().insert(
            (base.to_string(), head.to_string()),
            Comparison {
                behind_by,
                ahead_by,
            },
        );
    }

    /// Open PRs listed for `head` (`owner:branch`)
    pub fn set_open_prs(&self, head: &str, prs: Vec<PullRequest>) {
        self.open_prs.lock().unwrap().insert(head.to_string(), prs);
    }

    /// Make `get_ref` for `reference` fail with an API error
    pub fn fail_get_ref(&self, reference: &str, msg: &str) {
        self.error_on_get_ref
            .lock()
            .unwrap()
            .insert(reference.to_string(), msg.to_string());
    }

    /// Make `create_issue_comment` fail with an API error
    pub fn fail_comment(&self, msg: &str) {
        *self.error_on_comment.lock().unwrap() = Some(msg.to_string());
    }

    /// Current target of a reference
    pub fn ref_sha(&self, reference: &str) -> Option<String> {
        self.refs
            .lock()
            .unwrap()
            .get(reference)
            .map(|r| r.object.sha.clone())
    }

    // === Call verification methods ===

    pub fn get_ref_calls(&self) -> Vec<String> {
        self.get_ref_calls.lock().unwrap().clone()
    }

    pub fn create_ref_calls(&self) -> Vec<CreateRefCall> {
        self.create_ref_calls.lock().unwrap().clone()
    }

    pub fn get_commit_calls(&self) -> Vec<String> {
        self.get_commit_calls.lock().unwrap().clone()
    }

    pub fn compare_calls(&self) -> Vec<CompareCall> {
        self.compare_calls.lock().unwrap().clone()
    }

    pub fn get_content_calls(&self) -> Vec<GetContentCall> {
        self.get_content_calls.lock().unwrap().clone()
    }

    pub fn create_tree_calls(&self) -> Vec<CreateTreeCall> {
        self.create_tree_calls.lock().unwrap().clone()
    }

    pub fn create_commit_calls(&self) -> Vec<NewCommit> {
        self.create_commit_calls.lock().unwrap().clone()
    }

    pub fn update_ref_calls(&self) -> Vec<UpdateRefCall> {
        self.update_ref_calls.lock().unwrap().clone()
    }

    pub fn list_pr_calls(&self) -> Vec<String> {
        self.list_pr_calls.lock().unwrap().clone()
    }

    pub fn create_pr_calls(&self) -> Vec<NewPullRequest> {
        self.create_pr_calls.lock().unwrap().clone()
    }

    pub fn comment_calls(&self) -> Vec<CommentCall> {
        self.comment_calls.lock().unwrap().clone()
    }

    pub fn identity_calls(&self) -> usize {
        self.identity_calls.load(Ordering::SeqCst)
    }

    /// Number of calls that changed remote state
    pub fn mutation_count(&self) -> usize {
        self.create_ref_calls().len()
            + self.create_tree_calls().len()
            + self.create_commit_calls().len()
            + self.update_ref_calls().len()
            + self.create_pr_calls().len()
            + self.comment_calls().len()
    }
}

fn reference(name: &str, sha: &str) -> Reference {
    Reference {
        name: format!("refs/{name}"),
        object: GitObject {
            sha: sha.to_string(),
            kind: "commit".to_string(),
        },
    }
}

#[async_trait]
impl GitHubApi for MockGitHub {
    async fn get_ref(&self, _owner: &str, _repo: &str, reference: &str) -> Result<Reference> {
        self.get_ref_calls
            .lock()
            .unwrap()
            .push(reference.to_string());

        if let Some(msg) = self.error_on_get_ref.lock().unwrap().get(reference) {
            return Err(Error::GitHubApi(msg.clone()));
        }

        self.refs
            .lock()
            .unwrap()
            .get(reference)
            .cloned()
            .ok_or_else(|| Error::NotFound(reference.to_string()))
    }

    async fn create_ref(
        &self,
        _owner: &str,
        _repo: &str,
        reference: &str,
        sha: &str,
    ) -> Result<Reference> {
        self.create_ref_calls.lock().unwrap().push(CreateRefCall {
            reference: reference.to_string(),
            sha: sha.to_string(),
        });

        let mut refs = self.refs.lock().unwrap();
        if refs.contains_key(reference) {
            return Err(Error::GitHubApi("Reference already exists (422)".to_string()));
        }
        let created = self::reference(reference, sha);
        refs.insert(reference.to_string(), created.clone());
        Ok(created)
    }

    async fn get_commit(&self, _owner: &str, _repo: &str, sha: &str) -> Result<Commit> {
        self.get_commit_calls.lock().unwrap().push(sha.to_string());
        self.commits
            .lock()
            .unwrap()
            .get(sha)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("commit {sha}")))
    }

    async fn compare_commits(
        &self,
        owner: &str,
        repo: &str,
        base: &str,
        head: &str,
    ) -> Result<Comparison> {
        self.compare_calls.lock().unwrap().push(CompareCall {
            owner: owner.to_string(),
            repo: repo.to_string(),
            base: base.to_string(),
            head: head.to_string(),
        });
        self.comparisons
            .lock()
            .unwrap()
            .get(&(base.to_string(), head.to_string()))
            .copied()
            .ok_or_else(|| Error::NotFound(format!("compare {base}...{head}")))
    }

    async fn get_content(
        &self,
        _owner: &str,
        _repo: &str,
        path: &str,
        git_ref: &str,
    ) -> Result<RemoteContent> {
        self.get_content_calls.lock().unwrap().push(GetContentCall {
            path: path.to_string(),
            git_ref: git_ref.to_string(),
        });
        self.contents
            .lock()
            .unwrap()
            .get(&(git_ref.to_string(), path.to_string()))
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("{path} at {git_ref}")))
    }

    async fn create_tree(
        &self,
        _owner: &str,
        _repo: &str,
        base_tree: &str,
        entries: &[TreeEntry],
    ) -> Result<Tree> {
        self.create_tree_calls.lock().unwrap().push(CreateTreeCall {
            base_tree: base_tree.to_string(),
            entries: entries.to_vec(),
        });
        Ok(Tree {
            sha: format!("tree-new-{}", self.next_id()),
        })
    }

    async fn create_commit(&self, _owner: &str, _repo: &str, commit: &NewCommit) -> Result<Commit> {
        self.create_commit_calls.lock().unwrap().push(commit.clone());
        let created = Commit {
            sha: format!("commit-new-{}", self.next_id()),
            tree: ShaRef {
                sha: commit.tree.clone(),
            },
            parents: commit
                .parents
                .iter()
                .map(|sha| ShaRef { sha: sha.clone() })
                .collect(),
            message: commit.message.clone(),
            html_url: None,
        };
        self.commits
            .lock()
            .unwrap()
            .insert(created.sha.clone(), created.clone());
        Ok(created)
    }

    async fn update_ref(
        &self,
        _owner: &str,
        _repo: &str,
        reference: &str,
        sha: &str,
        force: bool,
    ) -> Result<Reference> {
        self.update_ref_calls.lock().unwrap().push(UpdateRefCall {
            reference: reference.to_string(),
            sha: sha.to_string(),
            force,
        });

        let mut refs = self.refs.lock().unwrap();
        if !refs.contains_key(reference) {
            return Err(Error::NotFound(reference.to_string()));
        }
        let updated = self::reference(reference, sha);
        refs.insert(reference.to_string(), updated.clone());
        Ok(updated)
    }

    async fn list_open_pull_requests(
        &self,
        _owner: &str,
        _repo: &str,
        head: &str,
    ) -> Result<Vec<PullRequest>> {
        self.list_pr_calls.lock().unwrap().push(head.to_string());
        Ok(self
            .open_prs
            .lock()
            .unwrap()
            .get(head)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pull: &NewPullRequest,
    ) -> Result<PullRequest> {
        self.create_pr_calls.lock().unwrap().push(pull.clone());
        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        Ok(PullRequest {
            number,
            html_url: format!("https://github.com/{owner}/{repo}/pull/{number}"),
            base_ref: pull.base.clone(),
            head_ref: pull.head.clone(),
            title: pull.title.clone(),
        })
    }

    async fn create_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        body: &str,
    ) -> Result<()> {
        self.comment_calls.lock().unwrap().push(CommentCall {
            owner: owner.to_string(),
            repo: repo.to_string(),
            number,
            body: body.to_string(),
        });

        if let Some(msg) = self.error_on_comment.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }
        Ok(())
    }

    async fn authenticated_identity(&self) -> Result<Identity> {
        self.identity_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.identity.clone())
    }
}

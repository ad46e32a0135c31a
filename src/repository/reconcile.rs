//! Pull request reconciliation

use crate::content::Content;
use crate::error::Result;
use crate::repository::ContentRepository;
use crate::types::{NewPullRequest, PullRequest};
use tracing::info;

/// What happened to the pull request for the head branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullRequestOutcome {
    /// Origin build is not a pull request build
    Skipped,
    /// Open pull requests for the head branch already exist
    AlreadyOpen(Vec<PullRequest>),
    /// A new pull request was opened and linked from the origin PR
    Created(PullRequest),
}

impl ContentRepository<'_> {
    /// Open a pull request for the head branch unless one is already open
    ///
    /// The origin PR gets a comment linking to the new one. The comment is
    /// posted after the PR is created; if it fails the PR stays, and a rerun
    /// finds it open and does not retry the comment.
    pub(super) async fn reconcile_pull_request(
        &self,
        content: &Content,
    ) -> Result<PullRequestOutcome> {
        if !self.origin.is_pr() {
            info!("skip creating a pull request because this is not a PR build");
            return Ok(PullRequestOutcome::Skipped);
        }

        let head = format!("{}:{}", self.origin.owner, self.head);
        let existing = self
            .api
            .list_open_pull_requests(&self.owner, &self.repo, &head)
            .await?;

        if !existing.is_empty() {
            let urls: Vec<&str> = existing.iter().map(|pr| pr.html_url.as_str()).collect();
            info!(branch = %head, ?urls, "skip creating a pull request because one already exists");
            return Ok(PullRequestOutcome::AlreadyOpen(existing));
        }

        let new_pull = NewPullRequest {
            base: self.base.clone(),
            head: self.head.clone(),
            title: format!("Update {}", content.path().unwrap_or_default()),
            body: format!("from {}", self.origin.pr_url()),
        };
        let pull = self
            .api
            .create_pull_request(&self.owner, &self.repo, &new_pull)
            .await?;

        let comment = format!(
            "Created a new pull request!\n:point_right: {}",
            pull.html_url
        );
        self.api
            .create_issue_comment(
                &self.origin.owner,
                &self.origin.repo,
                self.origin.pr_number,
                &comment,
            )
            .await?;

        info!(
            number = pull.number,
            html_url = %pull.html_url,
            title = %pull.title,
            "a new pull request was created"
        );

        Ok(PullRequestOutcome::Created(pull))
    }
}

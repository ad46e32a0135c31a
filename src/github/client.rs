//! GitHub service implementation using octocrab

use crate::error::{Error, Result};
use crate::github::GitHubApi;
use crate::types::{
    Commit, Comparison, Identity, NewCommit, NewPullRequest, PullRequest, Reference,
    RemoteContent, Tree, TreeEntry,
};
use async_trait::async_trait;
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

/// GitHub API client backed by octocrab
pub struct OctocrabGitHub {
    client: Octocrab,
}

#[derive(Serialize)]
struct RefQuery<'a> {
    #[serde(rename = "ref")]
    git_ref: &'a str,
}

#[derive(Serialize)]
struct CreateRefPayload<'a> {
    #[serde(rename = "ref")]
    reference: String,
    sha: &'a str,
}

#[derive(Serialize)]
struct UpdateRefPayload<'a> {
    sha: &'a str,
    force: bool,
}

#[derive(Serialize)]
struct CreateTreePayload<'a> {
    base_tree: &'a str,
    tree: &'a [TreeEntry],
}

#[derive(Deserialize)]
struct AuthenticatedUser {
    login: String,
    id: u64,
    name: Option<String>,
    email: Option<String>,
}

impl AuthenticatedUser {
    fn into_identity(self) -> Identity {
        let name = self
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.login.clone());
        let email = self
            .email
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| format!("{}+{}@users.noreply.github.com", self.id, self.login));
        Identity { name, email }
    }
}

impl OctocrabGitHub {
    /// Create a client for github.com, or for a GitHub Enterprise `host`
    pub fn new(token: &str, host: Option<&str>) -> Result<Self> {
        let base_uri = host.map(enterprise_api_url).transpose()?;
        Self::build(token, base_uri.as_ref().map(Url::as_str))
    }

    /// Create a client against an explicit API base URI
    pub fn with_base_uri(token: &str, base_uri: &str) -> Result<Self> {
        Self::build(token, Some(base_uri))
    }

    fn build(token: &str, base_uri: Option<&str>) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        if let Some(uri) = base_uri {
            builder = builder
                .base_uri(uri)
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
        }

        let client = builder.build().map_err(|e| Error::GitHubApi(e.to_string()))?;
        Ok(Self { client })
    }
}

fn enterprise_api_url(host: &str) -> Result<Url> {
    let url = Url::parse(&format!("https://{host}/api/v3"))
        .map_err(|e| Error::Parse(format!("invalid GH_HOST {host}: {e}")))?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(Error::Parse(format!("invalid GH_HOST {host}")));
    }
    Ok(url)
}

fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn to_pull_request(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    PullRequest {
        number: pr.number,
        html_url: pr
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        base_ref: pr.base.ref_field.clone(),
        head_ref: pr.head.ref_field.clone(),
        title: pr.title.as_deref().unwrap_or_default().to_string(),
    }
}

#[async_trait]
impl GitHubApi for OctocrabGitHub {
    async fn get_ref(&self, owner: &str, repo: &str, reference: &str) -> Result<Reference> {
        let route = format!("/repos/{owner}/{repo}/git/ref/{reference}");
        debug!(%route, "GET reference");
        Ok(self.client.get(route, None::<&()>).await?)
    }

    async fn create_ref(
        &self,
        owner: &str,
        repo: &str,
        reference: &str,
        sha: &str,
    ) -> Result<Reference> {
        let route = format!("/repos/{owner}/{repo}/git/refs");
        let payload = CreateRefPayload {
            reference: format!("refs/{reference}"),
            sha,
        };
        Ok(self.client.post(route, Some(&payload)).await?)
    }

    async fn get_commit(&self, owner: &str, repo: &str, sha: &str) -> Result<Commit> {
        let route = format!("/repos/{owner}/{repo}/git/commits/{sha}");
        Ok(self.client.get(route, None::<&()>).await?)
    }

    async fn compare_commits(
        &self,
        owner: &str,
        repo: &str,
        base: &str,
        head: &str,
    ) -> Result<Comparison> {
        let route = format!("/repos/{owner}/{repo}/compare/{base}...{head}");
        Ok(self.client.get(route, None::<&()>).await?)
    }

    async fn get_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: &str,
    ) -> Result<RemoteContent> {
        let route = format!("/repos/{owner}/{repo}/contents/{}", encode_path(path));
        let query = RefQuery { git_ref };
        Ok(self.client.get(route, Some(&query)).await?)
    }

    async fn create_tree(
        &self,
        owner: &str,
        repo: &str,
        base_tree: &str,
        entries: &[TreeEntry],
    ) -> Result<Tree> {
        let route = format!("/repos/{owner}/{repo}/git/trees");
        let payload = CreateTreePayload {
            base_tree,
            tree: entries,
        };
        Ok(self.client.post(route, Some(&payload)).await?)
    }

    async fn create_commit(&self, owner: &str, repo: &str, commit: &NewCommit) -> Result<Commit> {
        let route = format!("/repos/{owner}/{repo}/git/commits");
        Ok(self.client.post(route, Some(commit)).await?)
    }

    async fn update_ref(
        &self,
        owner: &str,
        repo: &str,
        reference: &str,
        sha: &str,
        force: bool,
    ) -> Result<Reference> {
        let route = format!("/repos/{owner}/{repo}/git/refs/{reference}");
        let payload = UpdateRefPayload { sha, force };
        Ok(self.client.patch(route, Some(&payload)).await?)
    }

    async fn list_open_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        head: &str,
    ) -> Result<Vec<PullRequest>> {
        let prs = self
            .client
            .pulls(owner, repo)
            .list()
            .head(head)
            .state(octocrab::params::State::Open)
            .send()
            .await?;

        Ok(prs.items.iter().map(to_pull_request).collect())
    }

    async fn create_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pull: &NewPullRequest,
    ) -> Result<PullRequest> {
        let pr = self
            .client
            .pulls(owner, repo)
            .create(&pull.title, &pull.head, &pull.base)
            .body(&pull.body)
            .send()
            .await?;

        Ok(to_pull_request(&pr))
    }

    async fn create_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        body: &str,
    ) -> Result<()> {
        self.client
            .issues(owner, repo)
            .create_comment(number, body)
            .await?;
        Ok(())
    }

    async fn authenticated_identity(&self) -> Result<Identity> {
        let user: AuthenticatedUser = self.client.get("/user", None::<&()>).await?;
        Ok(user.into_identity())
    }
}

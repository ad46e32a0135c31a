//! Local checkout inspection
//!
//! Used outside CI: the origin is whatever `git` reports for the current
//! directory.

use crate::error::{Error, Result};
use crate::origin::{CiKind, OriginMetadata};
use crate::types::Identity;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tokio::process::Command;
use tracing::debug;

static REMOTE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:https://github\.com/|git@github\.com:|ssh://git@github\.com/)([\w.-]+)/([\w.-]+?)(?:\.git)?/?$",
    )
    .expect("hardcoded remote URL pattern is valid")
});

/// Parse `owner` and `repo` from a GitHub remote URL
///
/// Accepts HTTPS (`https://github.com/owner/repo.git`) and SSH
/// (`git@github.com:owner/repo.git`) forms.
pub fn parse_remote_url(url: &str) -> Result<(String, String)> {
    let captures = REMOTE_URL
        .captures(url.trim())
        .ok_or_else(|| Error::Parse(format!("failed to parse git remote url: {url}")))?;
    Ok((captures[1].to_string(), captures[2].to_string()))
}

/// Commit identity from `git config`, if both name and email are set
pub async fn configured_identity() -> Option<Identity> {
    identity_in(Path::new(".")).await
}

async fn identity_in(dir: &Path) -> Option<Identity> {
    let name = git(dir, &["config", "user.name"]).await.ok()?;
    let email = git(dir, &["config", "user.email"]).await.ok()?;
    if name.is_empty() || email.is_empty() {
        return None;
    }
    Some(Identity { name, email })
}

/// Origin metadata of the checkout at `dir`
pub(crate) async fn inspect(dir: &Path) -> Result<OriginMetadata> {
    let sha = git(dir, &["rev-parse", "HEAD"]).await?;
    let remote = git(dir, &["remote", "get-url", "origin"]).await?;
    let (owner, repo) = parse_remote_url(&remote)?;
    // Detached HEAD has no branch
    let branch = git(dir, &["symbolic-ref", "--short", "HEAD"]).await.ok();

    Ok(OriginMetadata {
        url: format!("https://github.com/{owner}/{repo}"),
        owner,
        repo,
        sha,
        pr_number: 0,
        branch,
        ci: CiKind::Local,
    })
}

async fn git(dir: &Path, args: &[&str]) -> Result<String> {
    debug!(?args, "running git");
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .await?;

    if !output.status.success() {
        return Err(Error::Git(format!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

//! CI provider detection
//!
//! Providers are tried in order; the first whose marker variable is set
//! extracts the metadata.

use crate::error::{Error, Result};
use crate::origin::{CiKind, OriginMetadata};

/// Environment variable lookup
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// A recognized CI provider
pub struct CiProvider {
    /// Human-readable name
    pub name: &'static str,
    /// Kind recorded in the metadata
    pub kind: CiKind,
    detect: fn(Lookup<'_>) -> bool,
    extract: fn(Lookup<'_>) -> Result<OriginMetadata>,
}

impl CiProvider {
    /// Whether the environment belongs to this provider
    pub fn matches(&self, lookup: Lookup<'_>) -> bool {
        (self.detect)(lookup)
    }

    /// Build origin metadata from this provider's variables
    pub fn extract(&self, lookup: Lookup<'_>) -> Result<OriginMetadata> {
        (self.extract)(lookup)
    }
}

/// Recognized providers, in detection order
pub static PROVIDERS: &[CiProvider] = &[
    CiProvider {
        name: "Travis CI",
        kind: CiKind::Travis,
        detect: |env| flag(env, "TRAVIS"),
        extract: extract_travis,
    },
    CiProvider {
        name: "CircleCI",
        kind: CiKind::CircleCi,
        detect: |env| flag(env, "CIRCLECI"),
        extract: extract_circle,
    },
    CiProvider {
        name: "GitHub Actions",
        kind: CiKind::GitHubActions,
        detect: |env| flag(env, "GITHUB_ACTIONS"),
        extract: extract_github_actions,
    },
];

/// Metadata from the first matching provider, `None` if none matches
pub(crate) fn detect(lookup: Lookup<'_>) -> Result<Option<OriginMetadata>> {
    PROVIDERS
        .iter()
        .find(|provider| provider.matches(lookup))
        .map(|provider| provider.extract(lookup))
        .transpose()
}

fn flag(env: Lookup<'_>, key: &str) -> bool {
    env(key).as_deref() == Some("true")
}

fn optional(env: Lookup<'_>, key: &str) -> Option<String> {
    env(key).filter(|v| !v.is_empty())
}

fn required(env: Lookup<'_>, key: &str) -> Result<String> {
    optional(env, key).ok_or_else(|| Error::Metadata(format!("{key} is not set")))
}

fn pr_number(value: Option<String>) -> u64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(0)
}

fn split_slug(slug: &str) -> Result<(String, String)> {
    match slug.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(Error::Parse(format!("invalid repository slug: {slug}"))),
    }
}

fn github_url(owner: &str, repo: &str) -> String {
    format!("https://github.com/{owner}/{repo}")
}

fn extract_travis(env: Lookup<'_>) -> Result<OriginMetadata> {
    let (owner, repo) = split_slug(&required(env, "TRAVIS_REPO_SLUG")?)?;
    let sha = match optional(env, "TRAVIS_PULL_REQUEST_SHA") {
        Some(sha) => sha,
        None => required(env, "TRAVIS_COMMIT")?,
    };
    let branch =
        optional(env, "TRAVIS_PULL_REQUEST_BRANCH").or_else(|| optional(env, "TRAVIS_BRANCH"));

    Ok(OriginMetadata {
        url: github_url(&owner, &repo),
        owner,
        repo,
        sha,
        // "false" on push builds
        pr_number: pr_number(env("TRAVIS_PULL_REQUEST")),
        branch,
        ci: CiKind::Travis,
    })
}

fn extract_circle(env: Lookup<'_>) -> Result<OriginMetadata> {
    let owner = required(env, "CIRCLE_PROJECT_USERNAME")?;
    let repo = required(env, "CIRCLE_PROJECT_REPONAME")?;
    let sha = required(env, "CIRCLE_SHA1")?;
    let pr = optional(env, "CIRCLE_PR_NUMBER").or_else(|| {
        optional(env, "CIRCLE_PULL_REQUEST")
            .and_then(|url| url.rsplit('/').next().map(ToString::to_string))
    });

    Ok(OriginMetadata {
        url: github_url(&owner, &repo),
        owner,
        repo,
        sha,
        pr_number: pr_number(pr),
        branch: optional(env, "CIRCLE_BRANCH"),
        ci: CiKind::CircleCi,
    })
}

fn extract_github_actions(env: Lookup<'_>) -> Result<OriginMetadata> {
    let (owner, repo) = split_slug(&required(env, "GITHUB_REPOSITORY")?)?;
    let sha = required(env, "GITHUB_SHA")?;
    let pr = optional(env, "GITHUB_REF").and_then(|r| {
        r.strip_prefix("refs/pull/")
            .and_then(|rest| rest.split('/').next())
            .map(ToString::to_string)
    });
    let server = optional(env, "GITHUB_SERVER_URL").unwrap_or_else(|| "https://github.com".into());

    Ok(OriginMetadata {
        url: format!("{}/{owner}/{repo}", server.trim_end_matches('/')),
        owner,
        repo,
        sha,
        pr_number: pr_number(pr),
        branch: optional(env, "GITHUB_HEAD_REF").or_else(|| optional(env, "GITHUB_REF_NAME")),
        ci: CiKind::GitHubActions,
    })
}

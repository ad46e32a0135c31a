//! Push command - commit the origin sha into a target submodule

use crate::cli::style::{arrow, check, hyperlink_url, Stylize};
use anstream::println;
use ghsync::error::{Error, Result};
use ghsync::github::create_github_client;
use ghsync::origin::{build_metadata, configured_identity};
use ghsync::push::{push, PushReport, PushTarget};
use ghsync::repository::PullRequestOutcome;
use ghsync::types::Identity;

/// Run the push command
pub async fn run_push(
    slug: &str,
    base: &str,
    head: Option<&str>,
    submodule: Option<&str>,
    author: Option<Identity>,
) -> Result<()> {
    let Some(path) = submodule else {
        return Err(Error::Unsupported(
            "currently support only submodule mode".to_string(),
        ));
    };

    let origin = build_metadata().await?;

    let head = match head {
        Some(head) => head.to_string(),
        None => origin.default_head_branch().ok_or_else(|| {
            Error::Metadata("cannot derive a head branch name, pass --head".to_string())
        })?,
    };

    let author = match author {
        Some(author) => Some(author),
        None => configured_identity().await,
    };

    let target = PushTarget {
        slug: slug.to_string(),
        base: base.to_string(),
        head,
        path: path.to_string(),
        author,
    };

    println!(
        "{} {}@{} {} {}:{}",
        arrow(),
        origin.slug().accent(),
        origin.short_sha(),
        "->".muted(),
        target.slug.accent(),
        target.path
    );

    let client = create_github_client().await?;
    let report = push(&client, &origin, &target).await?;

    match report {
        PushReport::Unchanged { path, sha } => {
            println!("{} {path} already up to date at {}", check(), sha.muted());
        }
        PushReport::Updated(outcome) => {
            println!(
                "{} Committed {} on {} (based on {})",
                check(),
                outcome.commit.sha.emphasis(),
                target.head.accent(),
                outcome.base_commit.sha.muted()
            );
            match outcome.pull_request {
                PullRequestOutcome::Skipped => {
                    println!("  {}", "Not a pull request build, no PR opened".muted());
                }
                PullRequestOutcome::AlreadyOpen(pulls) => {
                    for pr in pulls {
                        println!(
                            "  PR #{} already open: {}",
                            pr.number,
                            hyperlink_url(&pr.html_url)
                        );
                    }
                }
                PullRequestOutcome::Created(pr) => {
                    println!(
                        "{} Created PR #{}: {}",
                        check(),
                        pr.number,
                        hyperlink_url(&pr.html_url)
                    );
                }
            }
        }
    }

    Ok(())
}

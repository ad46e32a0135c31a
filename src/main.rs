//! ghsync - sync submodule pointers across GitHub repositories
//!
//! CLI binary that commits a CI build's sha into another repository's
//! submodule and opens a pull request for it.

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use ghsync::error::Error;
use ghsync::types::Identity;

mod cli;

#[derive(Parser)]
#[command(name = "ghsync")]
#[command(about = "Propagate a submodule pointer into another GitHub repository")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Commit the current build's sha into a submodule of <owner>/<repo>
    Push {
        /// Target repository (owner/repo)
        slug: String,

        /// Base branch
        #[arg(long, default_value = "master")]
        base: String,

        /// Head branch (derived from the origin build when omitted)
        #[arg(long)]
        head: Option<String>,

        /// Submodule path in the target repository
        #[arg(long)]
        submodule: Option<String>,

        /// Commit author name
        #[arg(long, env = "GHSYNC_AUTHOR_NAME", requires = "author_email")]
        author_name: Option<String>,

        /// Commit author email
        #[arg(long, env = "GHSYNC_AUTHOR_EMAIL", requires = "author_name")]
        author_email: Option<String>,
    },

    /// Print the version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_logging(cli.verbose);

    match cli.command {
        Commands::Push {
            slug,
            base,
            head,
            submodule,
            author_name,
            author_email,
        } => {
            let author = author_name
                .zip(author_email)
                .map(|(name, email)| Identity { name, email });

            tokio::select! {
                result = cli::run_push(&slug, &base, head.as_deref(), submodule.as_deref(), author) => result?,
                _ = tokio::signal::ctrl_c() => return Err(Error::Cancelled.into()),
            }
        }
        Commands::Version => cli::run_version(),
    }

    Ok(())
}

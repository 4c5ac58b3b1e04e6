//! Lobster - workflow shell with change detection.
//!
//! This is the main entry point for the lobster CLI. Every command prints a
//! single JSON document to stdout; logs go to stderr.

mod commands;

use clap::{Parser, Subcommand};
use commands::*;
use lobster_workflows::email_triage::{DEFAULT_MAX, DEFAULT_QUERY};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lobster")]
#[command(author, version, about = "Workflow shell with change detection", long_about = None)]
struct Cli {
    /// Directory holding snapshot records (default: $LOBSTER_STATE_DIR or ~/.lobster/state)
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Subcommand
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare piped JSON items to the last stored snapshot for a key
    DiffLast {
        /// State key to compare under
        #[arg(long)]
        key: Option<String>,
        /// State key (positional form)
        #[arg(value_name = "KEY")]
        positional_key: Option<String>,
        /// Read items from a file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Check a GitHub pull request for changes since the last run
    GithubPrMonitor {
        /// Repository (owner/name)
        #[arg(long)]
        repo: String,
        /// Pull request number
        #[arg(long)]
        pr: u64,
        /// State key (default: github.pr:<repo>#<pr>)
        #[arg(long)]
        key: Option<String>,
    },
    /// Search recent email and sort it into buckets
    EmailTriage {
        /// Gmail search query
        #[arg(long, default_value = DEFAULT_QUERY)]
        query: String,
        /// Maximum number of messages
        #[arg(long, default_value_t = DEFAULT_MAX)]
        max: u32,
        /// Account to search
        #[arg(long)]
        account: Option<String>,
    },
    /// Print version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::DiffLast {
            key,
            positional_key,
            input,
        } => {
            let store = open_store(cli.state_dir)?;
            handle_diff_last(&store, key.or(positional_key), input).await
        }
        Commands::GithubPrMonitor { repo, pr, key } => {
            let store = open_store(cli.state_dir)?;
            handle_github_pr_monitor(&store, repo, pr, key).await
        }
        Commands::EmailTriage {
            query,
            max,
            account,
        } => handle_email_triage(query, max, account).await,
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

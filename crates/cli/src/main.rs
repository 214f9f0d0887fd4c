//! Domain Search CLI - search for domains from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Search once and print availability
//! ds-cli search my cool idea
//!
//! # Search as you type: one query per line, empty line clears
//! ds-cli watch
//!
//! # Print the marketplace link for a query
//! ds-cli open my cool idea
//! ```
//!
//! # Commands
//!
//! - `search` - One-shot search
//! - `watch` - Debounced search session over stdin
//! - `open` - Marketplace search link
//!
//! Configuration comes from `DOMAIN_SEARCH_*` environment variables; see
//! `domain_search_client::config`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ds-cli")]
#[command(author, version, about = "Domain Search CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search once and print the results
    Search {
        /// Query words
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Team to search as
        #[arg(short, long, env = "DOMAIN_SEARCH_TEAM_ID")]
        team: Option<String>,

        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },
    /// Search as you type, one query per stdin line
    Watch {
        /// Page URL to restore the query from and keep in sync
        #[arg(short, long)]
        url: Option<String>,

        /// Team to search as
        #[arg(short, long, env = "DOMAIN_SEARCH_TEAM_ID")]
        team: Option<String>,
    },
    /// Print the marketplace search link for a query
    Open {
        /// Query words
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ds_cli=info,domain_search_client=warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Search { query, team, json } => {
            commands::search::run(&query.join(" "), team, json).await
        }
        Commands::Watch { url, team } => commands::watch::run(url.as_deref(), team).await,
        Commands::Open { query } => commands::open::run(&query.join(" ")),
    }
}

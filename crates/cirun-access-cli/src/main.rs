mod root;

use anyhow::Context;
use cirun_access_core::config::{DEFAULT_API_URL, DEFAULT_ORG, DEFAULT_SERVER_URL};
use cirun_access_core::{process, Config};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cirun-access",
    about = "Process grant/revoke requests for cirun CI resources",
    version
)]
struct Cli {
    /// Requests repository root (default: auto-detect from .access_control.yml or .git/)
    #[arg(long, global = true, env = "ACCESS_ROOT")]
    root: Option<PathBuf>,

    /// GitHub organization hosting the feedstocks
    #[arg(long, global = true, env = "GH_ORG", default_value = DEFAULT_ORG)]
    org: String,

    /// Base URL feedstock clones come from
    #[arg(long, global = true, env = "GITHUB_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    server_url: String,

    /// GitHub API endpoint used for repository existence checks
    #[arg(long, global = true, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// API token; unauthenticated requests work but are rate-limited
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate pending requests without changing anything
    Check,

    /// Process all pending requests (the default when no subcommand is given)
    Run {
        /// Push the cleanup commit to the remote
        #[arg(long)]
        push: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    let cfg = Config {
        org: cli.org,
        server_url: cli.server_url,
        api_url: cli.api_url,
        token: cli.token,
    };

    let result = match cli.command {
        Some(Commands::Check) => {
            process::check(&cfg, &root).context("request validation failed")
        }
        Some(Commands::Run { push }) => {
            process::run(&cfg, &root, push).context("processing access control requests failed")
        }
        None => process::run(&cfg, &root, false)
            .context("processing access control requests failed"),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

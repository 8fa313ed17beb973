//! Freshsync - batch maintenance for a Freshservice instance
//!
//! # Configuration
//!
//! Set the following environment variables (or use a `.env` file):
//!
//! - `FRESHSERVICE_DOMAIN`: Root URL of the instance
//! - `FRESHSERVICE_API_KEY`: API key for authentication
//!
//! # Usage
//!
//! ```bash
//! # Create requesters for new directory users, grouped by cohort
//! freshsync sync-requesters --directory users.json \
//!     --cohort "staff:exact:1001:/Staff" --cohort "class-2029:contains:1002:2029"
//!
//! # Assign laptops to whoever signed in last
//! freshsync assign-assets --asset-type Laptop \
//!     --last-login-field last_login_by_17000000908 --match name --dry-run
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use freshsync::api_client::ApiClient;
use freshsync::config::Config;
use freshsync::sync::{self, AssignmentTarget, CohortRule, MatchMode, RunOptions};

/// Batch maintenance for a Freshservice instance.
#[derive(Debug, Parser)]
#[command(name = "freshsync")]
#[command(version)]
#[command(about = "Batch maintenance for a Freshservice instance")]
struct Cli {
    /// Pause between page fetches, in milliseconds.
    #[arg(long, global = true, value_name = "MS")]
    page_delay_ms: Option<u64>,

    /// Maximum pages a single listing may follow.
    #[arg(long, global = true, value_name = "N")]
    max_pages: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create requesters for directory users that do not exist yet.
    SyncRequesters {
        /// Directory export (JSON array of users, or `{"users": [...]}`).
        #[arg(long, value_name = "FILE")]
        directory: PathBuf,

        /// Cohort rule `NAME:exact|contains:GROUP_ID:PATTERN`; first match wins.
        #[arg(long = "cohort", value_name = "RULE", required = true)]
        cohorts: Vec<CohortRule>,

        /// Pause between create calls, in milliseconds.
        #[arg(long, value_name = "MS", default_value_t = 0)]
        pace_ms: u64,

        /// Report what would be created without creating anything.
        #[arg(long)]
        dry_run: bool,
    },

    /// Set each asset's user from its last-login type field.
    AssignAssets {
        /// Asset type name (e.g., Laptop).
        #[arg(long, value_name = "NAME")]
        asset_type: String,

        /// Type field holding the last sign-in.
        #[arg(long, value_name = "FIELD")]
        last_login_field: String,

        /// Match the field against `name` (first+last) or `email`.
        #[arg(long = "match", value_name = "MODE", default_value = "name")]
        mode: MatchMode,

        /// Only consider members of this requester group.
        #[arg(long, value_name = "ID")]
        requester_group: Option<u64>,

        /// Pause between update calls, in milliseconds.
        #[arg(long, value_name = "MS", default_value_t = 1000)]
        pace_ms: u64,

        /// Report what would change without updating anything.
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();

    // stdout carries the JSON report
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("freshsync=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting freshsync v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(ms) = cli.page_delay_ms {
        config.page_delay = Duration::from_millis(ms);
    }
    if let Some(max_pages) = cli.max_pages {
        anyhow::ensure!(max_pages > 0, "--max-pages must be at least 1");
        config.max_pages = max_pages;
    }

    tracing::debug!("Configuration loaded, domain: {}", config.domain);

    let client = ApiClient::new(&config).context("Failed to create API client")?;

    let report = match cli.command {
        Command::SyncRequesters {
            directory,
            cohorts,
            pace_ms,
            dry_run,
        } => {
            let users = sync::load_directory_export(&directory)
                .with_context(|| format!("Failed to read {}", directory.display()))?;
            let options = RunOptions {
                dry_run,
                pace: Duration::from_millis(pace_ms),
            };
            let report = sync::sync_requesters(&client, &users, &cohorts, &options)
                .await
                .context("Requester sync failed")?;
            tracing::info!(
                created = report.created.len(),
                failed = report.failed.len(),
                "Requester sync finished"
            );
            serde_json::to_string_pretty(&report)?
        }
        Command::AssignAssets {
            asset_type,
            last_login_field,
            mode,
            requester_group,
            pace_ms,
            dry_run,
        } => {
            let target = AssignmentTarget {
                asset_type,
                last_login_field,
                mode,
                requester_group_id: requester_group,
            };
            let options = RunOptions {
                dry_run,
                pace: Duration::from_millis(pace_ms),
            };
            let report = sync::assign_assets(&client, &target, &options)
                .await
                .context("Asset assignment failed")?;
            tracing::info!(
                scanned = report.assets_scanned,
                assigned = report.assigned.len(),
                failed = report.failed.len(),
                "Asset assignment finished"
            );
            serde_json::to_string_pretty(&report)?
        }
    };

    println!("{}", report);

    Ok(())
}

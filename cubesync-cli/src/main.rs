//! Cubesync — CSV → workspace database sync CLI.
//!
//! # Usage
//!
//! ```text
//! cubesync init [--config <path>]
//! cubesync sync [--dry-run] [--config <path>]
//! cubesync pull [--config <path>]
//! cubesync status [--json] [--config <path>]
//! ```
//!
//! The remote API token is read from `CUBESYNC_TOKEN`; everything else
//! comes from the YAML config.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{init::InitArgs, pull::PullArgs, status::StatusArgs, sync::SyncArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "cubesync",
    version,
    about = "Sync the speedcubing algorithm dataset into the workspace database",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Populate the remote collections for algsets not added yet.
    Init(InitArgs),

    /// Reconcile the refreshed dataset against the remote collections.
    Sync(SyncArgs),

    /// Re-query the remote collections and rewrite the local snapshots.
    Pull(PullArgs),

    /// Show snapshot freshness and pending work.
    Status(StatusArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Init(args) => args.run(),
        Commands::Sync(args) => args.run(),
        Commands::Pull(args) => args.run(),
        Commands::Status(args) => args.run(),
    }
}

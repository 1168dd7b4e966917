//! Subcommand implementations and shared config/remote plumbing.

pub mod init;
pub mod pull;
pub mod status;
pub mod sync;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use cubesync_core::SyncConfig;
use cubesync_sync::HttpRemote;

/// Environment variable holding the workspace API token.
pub const TOKEN_VAR: &str = "CUBESYNC_TOKEN";

/// Config-path argument shared by every subcommand.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Path to the cubesync config file.
    #[arg(long, default_value = "cubesync.yaml")]
    pub config: PathBuf,
}

impl ConfigArgs {
    pub fn load(&self) -> Result<SyncConfig> {
        SyncConfig::load_at(&self.config)
            .with_context(|| format!("failed to load config '{}'", self.config.display()))
    }
}

/// Build the HTTP remote from the config plus the token env var.
pub fn connect(config: &SyncConfig) -> Result<HttpRemote> {
    let token = std::env::var(TOKEN_VAR)
        .with_context(|| format!("{TOKEN_VAR} is not set; export the workspace API token"))?;
    Ok(HttpRemote::new(&config.remote, token))
}

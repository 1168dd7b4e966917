//! `cubesync pull` — refresh the local snapshots from the remote.

use anyhow::{Context, Result};
use clap::Args;

use cubesync_sync::pipeline::{self, Operation};

use super::{connect, ConfigArgs};

/// Arguments for `cubesync pull`.
#[derive(Args, Debug)]
pub struct PullArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

impl PullArgs {
    pub fn run(self) -> Result<()> {
        let config = self.config.load()?;
        let remote = connect(&config)?;

        let report = pipeline::run(&config, &remote, Operation::Pull).context("pull failed")?;

        println!(
            "✓ pulled {} cases, {} algs",
            report.cases_pulled, report.algs_pulled
        );
        Ok(())
    }
}

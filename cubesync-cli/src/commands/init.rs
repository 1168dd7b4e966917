//! `cubesync init` — first population of the remote collections.

use anyhow::{Context, Result};
use clap::Args;

use cubesync_sync::pipeline::{self, Operation};

use super::{connect, ConfigArgs};

/// Arguments for `cubesync init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        let config = self.config.load()?;
        let remote = connect(&config)?;

        let report =
            pipeline::run(&config, &remote, Operation::Initialize).context("initialize failed")?;

        println!(
            "✓ initialized ({} cases, {} algs, {} orientation groups)",
            report.cases_created, report.algs_created, report.orientation_groups
        );
        println!(
            "  Snapshots saved to: {}, {}",
            config.assets.case_snapshot.display(),
            config.assets.alg_snapshot.display()
        );
        Ok(())
    }
}

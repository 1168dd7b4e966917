//! `cubesync sync` — reconcile the refreshed dataset against the remote.

use anyhow::{Context, Result};
use clap::Args;

use cubesync_sync::pipeline::{self, Operation};
use cubesync_sync::SyncPlan;

use super::{connect, ConfigArgs};

/// Arguments for `cubesync sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Show what would change without calling the remote or writing
    /// snapshots.
    #[arg(long)]
    pub dry_run: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let config = self.config.load()?;

        if self.dry_run {
            let plan = pipeline::plan_incremental(&config).context("dry-run plan failed")?;
            print_plan(&plan);
            return Ok(());
        }

        let remote = connect(&config)?;
        let report =
            pipeline::run(&config, &remote, Operation::Incremental).context("sync failed")?;

        println!(
            "✓ synced ({} algs created, {} ranks updated, {} faves updated, {} relations rebuilt)",
            report.algs_created, report.ranks_updated, report.faves_updated, report.relations_updated
        );
        Ok(())
    }
}

fn print_plan(plan: &SyncPlan) {
    if plan.to_create.is_empty() && plan.rank_updates.is_empty() && plan.fave_updates.is_empty() {
        println!("[dry-run] ✓ nothing to do");
        return;
    }

    println!(
        "[dry-run] ✓ {} to create, {} rank updates, {} fave updates",
        plan.to_create.len(),
        plan.rank_updates.len(),
        plan.fave_updates.len()
    );
    for alg in &plan.to_create {
        println!("  +  {} ({}, rank {})", alg.alg, alg.case_name, alg.rank);
    }
    for update in &plan.rank_updates {
        println!("  ~  {} → rank {}", update.remote_id, update.rank);
    }
    for update in &plan.fave_updates {
        let flag = if update.fave { "fave" } else { "unfave" };
        println!("  ~  {} → {}", update.remote_id, flag);
    }
}

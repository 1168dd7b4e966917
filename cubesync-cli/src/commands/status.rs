//! `cubesync status` — snapshot freshness and pending-work visibility.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use cubesync_core::snapshot;
use cubesync_core::types::{AlgSnapshot, CaseSnapshot};
use cubesync_core::StoreError;
use cubesync_sync::{pipeline, SyncPlan};

use super::ConfigArgs;

/// Arguments for `cubesync status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let config = self.config.load()?;

        let rows = vec![
            snapshot_row::<CaseSnapshot>("cases", &config.assets.case_snapshot)?,
            snapshot_row::<AlgSnapshot>("algorithms", &config.assets.alg_snapshot)?,
        ];
        // Pending work is best-effort: without a dataset or snapshots there
        // is nothing to diff yet.
        let pending = pipeline::plan_incremental(&config).ok();

        if self.json {
            print_json(&rows, pending.as_ref())?;
            return Ok(());
        }

        print_table(&config.assets.dataset, &rows, pending.as_ref());
        Ok(())
    }
}

#[derive(Debug)]
struct SnapshotRow {
    collection: &'static str,
    records: Option<usize>,
    synced_at: Option<DateTime<Utc>>,
}

fn snapshot_row<T: serde::de::DeserializeOwned>(
    collection: &'static str,
    path: &Path,
) -> Result<SnapshotRow> {
    match snapshot::load::<T>(path) {
        Ok(file) => Ok(SnapshotRow {
            collection,
            records: Some(file.records.len()),
            synced_at: Some(file.synced_at),
        }),
        Err(StoreError::SnapshotNotFound { .. }) => Ok(SnapshotRow {
            collection,
            records: None,
            synced_at: None,
        }),
        Err(other) => {
            Err(other).with_context(|| format!("failed to load the {collection} snapshot"))
        }
    }
}

// ---------------------------------------------------------------------------
// JSON output
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct StatusJson {
    snapshots: Vec<SnapshotJson>,
    pending: Option<PendingJson>,
}

#[derive(Serialize)]
struct SnapshotJson {
    collection: &'static str,
    records: Option<usize>,
    synced_at: Option<String>,
}

#[derive(Serialize)]
struct PendingJson {
    to_create: usize,
    rank_updates: usize,
    fave_updates: usize,
}

fn print_json(rows: &[SnapshotRow], pending: Option<&SyncPlan>) -> Result<()> {
    let payload = StatusJson {
        snapshots: rows
            .iter()
            .map(|row| SnapshotJson {
                collection: row.collection,
                records: row.records,
                synced_at: row.synced_at.map(|at| at.to_rfc3339()),
            })
            .collect(),
        pending: pending.map(|plan| PendingJson {
            to_create: plan.to_create.len(),
            rank_updates: plan.rank_updates.len(),
            fave_updates: plan.fave_updates.len(),
        }),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize status JSON")?
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Table output
// ---------------------------------------------------------------------------

#[derive(Tabled)]
struct StatusTableRow {
    #[tabled(rename = "collection")]
    collection: &'static str,
    #[tabled(rename = "records")]
    records: String,
    #[tabled(rename = "last pulled")]
    last_pulled: String,
}

fn print_table(dataset: &Path, rows: &[SnapshotRow], pending: Option<&SyncPlan>) {
    println!(
        "Cubesync v{} | dataset: {}",
        env!("CARGO_PKG_VERSION"),
        dataset.display()
    );

    let table_rows: Vec<StatusTableRow> = rows
        .iter()
        .map(|row| StatusTableRow {
            collection: row.collection,
            records: row
                .records
                .map(|count| count.to_string())
                .unwrap_or_else(|| "-".to_string()),
            last_pulled: row
                .synced_at
                .map(format_age)
                .unwrap_or_else(|| "never".to_string()),
        })
        .collect();
    let mut table = Table::new(table_rows);
    table.with(Style::rounded());
    println!("{table}");

    match pending {
        Some(plan)
            if plan.to_create.is_empty()
                && plan.rank_updates.is_empty()
                && plan.fave_updates.is_empty() =>
        {
            println!("{} in sync with the dataset", "●".green().bold());
        }
        Some(plan) => {
            println!(
                "{} pending: {} to create, {} rank updates, {} fave updates",
                "●".yellow().bold(),
                plan.to_create.len(),
                plan.rank_updates.len(),
                plan.fave_updates.len()
            );
            println!("Run 'cubesync sync' to apply.");
        }
        None => {
            println!(
                "{} pending work unknown — dataset or snapshots incomplete",
                "●".bright_black().bold()
            );
        }
    }
}

fn format_age(at: DateTime<Utc>) -> String {
    let minutes = (Utc::now() - at).num_minutes();
    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if minutes < 48 * 60 {
        format!("{}h ago", minutes / 60)
    } else {
        format!("{}d ago", minutes / (24 * 60))
    }
}

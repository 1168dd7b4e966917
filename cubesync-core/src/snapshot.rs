//! Snapshot store — JSON mirrors of previously synced remote records.
//!
//! Persists one file per collection (cases, algorithms). New writes produce
//! a structured `{ syncedAt, records }` envelope; files written by earlier
//! tooling are bare JSON arrays and still load through an untagged compat
//! enum. Writes use the `.tmp` + rename pattern so a crashed run never
//! leaves a half-written snapshot.
//!
//! The favorites list is hand-maintained, always a bare array, and never
//! written by this tool.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{io_err, StoreError};
use crate::types::FavoriteEntry;

/// On-disk snapshot payload for one remote collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotFile<T> {
    pub synced_at: DateTime<Utc>,
    pub records: Vec<T>,
}

impl<T> SnapshotFile<T> {
    /// A snapshot stamped with the current time.
    pub fn new(records: Vec<T>) -> Self {
        Self {
            synced_at: Utc::now(),
            records,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SnapshotCompat<T> {
    Structured(SnapshotStructuredCompat<T>),
    Legacy(Vec<T>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotStructuredCompat<T> {
    synced_at: Option<DateTime<Utc>>,
    records: Vec<T>,
}

/// Load the snapshot at `path`.
///
/// A missing file is [`StoreError::SnapshotNotFound`] — snapshots only
/// exist after a sync run or `cubesync pull` has written them.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<SnapshotFile<T>, StoreError> {
    if !path.exists() {
        return Err(StoreError::SnapshotNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    match serde_json::from_str::<SnapshotCompat<T>>(&contents)? {
        SnapshotCompat::Structured(snapshot) => Ok(SnapshotFile {
            synced_at: snapshot.synced_at.unwrap_or_else(Utc::now),
            records: snapshot.records,
        }),
        SnapshotCompat::Legacy(records) => Ok(SnapshotFile {
            synced_at: Utc::now(),
            records,
        }),
    }
}

/// Save a snapshot to `path` atomically.
///
/// Writes to `<path>.tmp` then renames to `<path>`.
pub fn save<T: Serialize>(path: &Path, snapshot: &SnapshotFile<T>) -> Result<(), StoreError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
    }

    let json = serde_json::to_string_pretty(snapshot)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, &json).map_err(|e| io_err(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| io_err(path, e))?;
    Ok(())
}

/// Load the hand-maintained favorites list at `path` (bare JSON array).
pub fn load_favorites(path: &Path) -> Result<Vec<FavoriteEntry>, StoreError> {
    if !path.exists() {
        return Err(StoreError::SnapshotNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    Ok(serde_json::from_str(&contents)?)
}

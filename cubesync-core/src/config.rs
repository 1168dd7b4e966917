//! Sync configuration — `cubesync.yaml`.
//!
//! ```yaml
//! remote:
//!   base_url: https://api.workspace.example/v1
//!   case_database_id: aaaa-1111
//!   alg_database_id: bbbb-2222
//! assets:
//!   dataset: asset/all_algs.csv
//! batch_size: 80
//! orientation_algset: F2L
//! ```
//!
//! Only the `remote` section is required; asset paths, batch size, and the
//! orientation algset default sensibly. The API token is deliberately not
//! part of the file — it comes from the `CUBESYNC_TOKEN` environment
//! variable at the CLI edge.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Remote database endpoints and collection ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the workspace database API.
    pub base_url: String,
    /// Database id of the case collection.
    pub case_database_id: String,
    /// Database id of the algorithm collection.
    pub alg_database_id: String,
}

/// Local asset file locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    /// Dataset CSV exported from the upstream source.
    pub dataset: PathBuf,
    /// Case snapshot JSON.
    pub case_snapshot: PathBuf,
    /// Algorithm snapshot JSON.
    pub alg_snapshot: PathBuf,
    /// Hand-maintained favorites JSON.
    pub favorites: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("asset/all_algs.csv"),
            case_snapshot: PathBuf::from("asset/case_snapshot.json"),
            alg_snapshot: PathBuf::from("asset/alg_snapshot.json"),
            favorites: PathBuf::from("asset/favorites.json"),
        }
    }
}

/// Root of the cubesync YAML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    pub remote: RemoteConfig,
    #[serde(default)]
    pub assets: AssetPaths,
    /// Records per remote batch. The remote side starts rejecting requests
    /// somewhere above this; 80 is an empirical ceiling, not a documented
    /// limit.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Algset tag whose orientation variants get grouped under their
    /// canonical case.
    #[serde(default = "default_orientation_algset")]
    pub orientation_algset: String,
}

fn default_batch_size() -> usize {
    80
}

fn default_orientation_algset() -> String {
    "F2L".to_string()
}

impl SyncConfig {
    /// Load the config from `path`.
    ///
    /// Returns `ConfigNotFound` if absent, `ConfigParse` (with path + line
    /// context) if malformed YAML.
    pub fn load_at(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Err(StoreError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path).map_err(|e| crate::error::io_err(path, e))?;
        serde_yaml::from_str(&contents).map_err(|source| StoreError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

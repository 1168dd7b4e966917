//! Error types for cubesync-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from dataset, snapshot, and config operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failure, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV read/parse error on the dataset file.
    #[error("failed to read dataset at {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// JSON serialization/deserialization error (snapshot store).
    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A snapshot file did not exist at the expected path.
    ///
    /// Snapshots are only produced by a sync run; `cubesync pull` rebuilds
    /// them from the remote collections.
    #[error("snapshot not found at {path}; run `cubesync pull` to rebuild it")]
    SnapshotNotFound { path: PathBuf },

    /// The config YAML file did not exist at the expected path.
    #[error("config not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// YAML parse error on config load — includes file path and line
    /// context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Convenience constructor for [`StoreError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.into(),
        source,
    }
}

/// Convenience constructor for [`StoreError::Csv`].
pub(crate) fn csv_err(path: impl Into<PathBuf>, source: csv::Error) -> StoreError {
    StoreError::Csv {
        path: path.into(),
        source,
    }
}

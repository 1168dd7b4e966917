//! Error types for cubesync-sync.

use thiserror::Error;

use cubesync_core::error::StoreError;
use cubesync_core::types::CaseName;

/// All errors that can arise from remote store operations.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The remote API rejected a request (4xx/5xx).
    #[error("remote API error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// Transport-level failure (DNS, TLS, connection).
    #[error("remote transport error: {0}")]
    Transport(#[source] Box<ureq::Error>),

    /// The response body could not be read or was not valid JSON.
    #[error("malformed remote response: {0}")]
    Response(#[from] std::io::Error),

    /// The create endpoint returned no record id.
    #[error("create response carried no record id")]
    MissingId,

    /// A queried record lacked an expected property.
    #[error("remote record {remote_id} is missing property '{field}'")]
    MissingField {
        remote_id: String,
        field: &'static str,
    },
}

/// All errors that can arise from sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error from the dataset / snapshot / config layer.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// An error from the remote store.
    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),

    /// A dataset case has no entry in the case snapshot.
    ///
    /// The snapshot is stale relative to the CSV; `cubesync init` (new
    /// algset) or `cubesync pull` brings it back in step.
    #[error("no case snapshot entry for '{name}'; the case snapshot is stale")]
    MissingCaseSnapshot { name: CaseName },
}

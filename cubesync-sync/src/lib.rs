//! # cubesync-sync
//!
//! Reconciliation core and remote sync orchestration.
//!
//! The diff functions in [`transform`], [`reconcile`], and [`relations`]
//! are pure; [`pipeline`] sequences them into the `initialize`,
//! `sync_incremental`, and `pull` operations, applying each computed delta
//! through a [`RemoteStore`] in fixed-size batches.

pub mod batch;
pub mod error;
pub mod mapping;
pub mod pipeline;
pub mod reconcile;
pub mod relations;
pub mod remote;
pub mod transform;

pub use error::{RemoteError, SyncError};
pub use pipeline::{Operation, SyncPlan, SyncReport};
pub use reconcile::{AlgDiff, FaveUpdate, RankUpdate, ORPHANED_RANK};
pub use relations::RelationUpdate;
pub use remote::{Collection, HttpRemote, NewRecord, RecordPatch, RemoteRecord, RemoteStore, SortKey};

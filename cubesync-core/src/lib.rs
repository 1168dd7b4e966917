//! Cubesync core library — domain types, dataset loading, snapshot store,
//! configuration.
//!
//! Public API surface:
//! - [`types`] — newtypes and domain structs
//! - [`error`] — [`StoreError`]
//! - [`dataset`] — CSV case loader
//! - [`snapshot`] — JSON snapshot load / save
//! - [`config`] — YAML sync configuration

pub mod config;
pub mod dataset;
pub mod error;
pub mod snapshot;
pub mod types;

pub use config::SyncConfig;
pub use error::StoreError;
pub use types::{
    AlgSnapshot, AlgorithmRecord, CaseName, CaseRecord, CaseSnapshot, FavoriteEntry, RemoteId,
};

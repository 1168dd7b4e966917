//! Transformer — expands case records into ranked algorithm records.
//!
//! Joins each case against the case snapshot **by name**. The join is keyed
//! rather than positional: the dataset and the snapshot come from different
//! sources (CSV export vs. remote query) and agree on order only by
//! accident. A case without a snapshot entry is a hard error, not a silent
//! misassociation.

use std::collections::HashMap;

use cubesync_core::types::{AlgorithmRecord, CaseName, CaseRecord, CaseSnapshot, RemoteId};

use crate::error::SyncError;

/// Expand `cases` into algorithm records, joining in each case's remote id
/// from `snapshots`.
///
/// Output preserves case order, then rank order within a case. A case with
/// four blank algs contributes nothing.
pub fn expand(
    cases: &[CaseRecord],
    snapshots: &[CaseSnapshot],
) -> Result<Vec<AlgorithmRecord>, SyncError> {
    let by_name: HashMap<&CaseName, &RemoteId> = snapshots
        .iter()
        .map(|snap| (&snap.name, &snap.remote_id))
        .collect();

    let mut algs = Vec::new();
    for case in cases {
        let remote_id = by_name
            .get(&case.name)
            .copied()
            .ok_or_else(|| SyncError::MissingCaseSnapshot {
                name: case.name.clone(),
            })?;
        for (rank, alg) in case.ranked_algs() {
            algs.push(AlgorithmRecord {
                alg: alg.to_string(),
                rank,
                case_name: case.name.clone(),
                case_remote_id: remote_id.clone(),
            });
        }
    }
    Ok(algs)
}

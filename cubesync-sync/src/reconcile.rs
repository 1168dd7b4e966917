//! Reconciler — create/update decisions for algorithm records.
//!
//! Pure diffs of the freshly expanded dataset against the cached remote
//! snapshot. Nothing here touches the network; [`crate::pipeline`] applies
//! the results.

use cubesync_core::types::{AlgSnapshot, AlgorithmRecord, FavoriteEntry, RemoteId};

/// Sentinel rank for a remote algorithm no longer present in the dataset.
///
/// The remote side exposes no delete-by-diff signal to this tool, so stale
/// records are demoted below every real rank (1..=4) instead of removed.
pub const ORPHANED_RANK: u32 = 5;

/// A pending rank correction for one remote algorithm record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankUpdate {
    pub rank: u32,
    pub remote_id: RemoteId,
}

/// A pending favorite-flag correction for one remote algorithm record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaveUpdate {
    pub fave: bool,
    pub remote_id: RemoteId,
}

/// Outcome of [`diff_algorithms`]: disjoint create and update sets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlgDiff {
    pub to_create: Vec<AlgorithmRecord>,
    pub to_update: Vec<RankUpdate>,
}

/// Partition the current dataset against the remote snapshot.
///
/// - `to_create`: current records whose `(alg, case name)` pair has no
///   snapshot match, in current-record order.
/// - `to_update`: iterates the snapshot, in snapshot order. A snapshot
///   record with no current match is demoted to [`ORPHANED_RANK`] unless
///   already there; a matched record with a drifted rank gets the new rank.
///
/// Matched-and-correct records produce nothing, so applying the updates and
/// re-running yields an empty update set.
pub fn diff_algorithms(current: &[AlgorithmRecord], remote: &[AlgSnapshot]) -> AlgDiff {
    let to_create = current
        .iter()
        .filter(|rec| {
            !remote
                .iter()
                .any(|old| old.alg == rec.alg && old.name == rec.case_name)
        })
        .cloned()
        .collect();

    let mut to_update = Vec::new();
    for old in remote {
        let matched = current
            .iter()
            .find(|rec| rec.alg == old.alg && rec.case_name == old.name);
        match matched {
            None if old.rank != ORPHANED_RANK => to_update.push(RankUpdate {
                rank: ORPHANED_RANK,
                remote_id: old.remote_id.clone(),
            }),
            Some(rec) if rec.rank != old.rank => to_update.push(RankUpdate {
                rank: rec.rank,
                remote_id: old.remote_id.clone(),
            }),
            _ => {}
        }
    }

    AlgDiff {
        to_create,
        to_update,
    }
}

/// Compute favorite-flag corrections for the remote snapshot.
///
/// A record should be flagged iff some favorites entry matches its alg text
/// exactly and its algset tag appears within the record's case name. Emits
/// an update only when the computed flag differs from the cached one, in
/// either direction.
pub fn diff_favorites(remote: &[AlgSnapshot], favorites: &[FavoriteEntry]) -> Vec<FaveUpdate> {
    let mut updates = Vec::new();
    for old in remote {
        let wanted = favorites
            .iter()
            .any(|fav| fav.alg == old.alg && old.name.as_str().contains(&fav.algset));
        if wanted != old.fave {
            updates.push(FaveUpdate {
                fave: wanted,
                remote_id: old.remote_id.clone(),
            });
        }
    }
    updates
}

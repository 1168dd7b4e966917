//! Relation builders — derived links between remote records.
//!
//! Both builders are pure and idempotent: re-applying the same relation set
//! is a no-op at the remote end.

use cubesync_core::types::{AlgSnapshot, CaseSnapshot, RemoteId};

/// A relation field rewrite: `owner`'s relation property becomes `members`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationUpdate {
    pub owner: RemoteId,
    pub members: Vec<RemoteId>,
}

/// Group orientation variants under their canonical case.
///
/// An owner is a case whose name contains `algset_tag` and carries no
/// hyphen (the hyphen suffix marks an orientation variant). Its members are
/// every case whose name contains the owner's full name — the owner itself
/// included.
pub fn orientation_groups(cases: &[CaseSnapshot], algset_tag: &str) -> Vec<RelationUpdate> {
    cases
        .iter()
        .filter(|owner| {
            owner.name.as_str().contains(algset_tag) && !owner.name.as_str().contains('-')
        })
        .map(|owner| RelationUpdate {
            owner: owner.remote_id.clone(),
            members: cases
                .iter()
                .filter(|case| case.name.as_str().contains(owner.name.as_str()))
                .map(|case| case.remote_id.clone())
                .collect(),
        })
        .collect()
}

/// Link each case to its algorithms, in snapshot order.
///
/// The algorithm snapshot comes from a rank-sorted remote query, so members
/// land in rank order. Emits one update per case even when the member list
/// is empty — that clears stale relations.
pub fn case_alg_relations(cases: &[CaseSnapshot], algs: &[AlgSnapshot]) -> Vec<RelationUpdate> {
    cases
        .iter()
        .map(|case| RelationUpdate {
            owner: case.remote_id.clone(),
            members: algs
                .iter()
                .filter(|alg| alg.name == case.name)
                .map(|alg| alg.remote_id.clone())
                .collect(),
        })
        .collect()
}

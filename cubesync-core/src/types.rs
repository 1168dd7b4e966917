//! Domain types for the cubesync dataset and snapshot mirror.
//!
//! Case and algorithm records are ephemeral — recomputed from the CSV on
//! every run. Snapshot types mirror previously synced remote records and
//! persist between runs via [`crate::snapshot`].

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed case name — the human-assigned identifier encoding
/// algset, variant, and orientation (e.g. `F2L01-a`).
///
/// Unique within one dataset; the sole identity of a case record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseName(pub String);

impl CaseName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for CaseName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CaseName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A strongly-typed identifier assigned by the remote database to a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteId(pub String);

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for RemoteId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RemoteId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Dataset records
// ---------------------------------------------------------------------------

/// One row of the dataset CSV: a case plus up to four ranked algorithms.
///
/// Field names follow the CSV header; blank strings stand for absent
/// algorithms and media.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub name: CaseName,
    pub algset: String,
    #[serde(rename = "caseid")]
    pub case_id: String,
    pub catalog: String,
    pub alg1: String,
    pub alg2: String,
    pub alg3: String,
    pub alg4: String,
    pub video: String,
    #[serde(rename = "videoimg")]
    pub video_img: String,
    pub color: String,
    pub orientation: String,
}

impl CaseRecord {
    /// The case's non-blank algorithms paired with their 1-based rank.
    ///
    /// Rank is the position among the surviving values in `alg1..alg4`
    /// field order, so a blank `alg2` promotes `alg3` to rank 2.
    pub fn ranked_algs(&self) -> Vec<(u32, &str)> {
        [&self.alg1, &self.alg2, &self.alg3, &self.alg4]
            .into_iter()
            .filter(|alg| !alg.is_empty())
            .enumerate()
            .map(|(i, alg)| (i as u32 + 1, alg.as_str()))
            .collect()
    }
}

/// One ranked algorithm derived from a [`CaseRecord`], joined with the
/// case's remote identifier.
///
/// Identified by the `(alg, case_name)` pair; duplicate algorithm text
/// under the same case is a dataset precondition, not a handled case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmRecord {
    pub alg: String,
    pub rank: u32,
    pub case_name: CaseName,
    pub case_remote_id: RemoteId,
}

// ---------------------------------------------------------------------------
// Snapshot records
// ---------------------------------------------------------------------------

/// Cached mirror of a previously synced case record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseSnapshot {
    pub name: CaseName,
    #[serde(rename = "remoteId")]
    pub remote_id: RemoteId,
}

/// Cached mirror of a previously synced algorithm record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgSnapshot {
    pub alg: String,
    pub rank: u32,
    pub name: CaseName,
    pub fave: bool,
    #[serde(rename = "remoteId")]
    pub remote_id: RemoteId,
}

/// One entry of the hand-maintained favorites list.
///
/// `algset` matches by substring against case names, so `"F2L"` covers
/// every `F2L*` case including orientation variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub alg: String,
    pub algset: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

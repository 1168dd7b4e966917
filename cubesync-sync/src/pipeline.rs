//! Sync pipeline — ordered pure-diff-then-apply phases.
//!
//! Three operations, all driven through a [`RemoteStore`]:
//!
//! - [`initialize`] — first population of the two collections for any
//!   algsets the remote does not have yet.
//! - [`sync_incremental`] — the routine run after a dataset refresh:
//!   reconcile ranks, create added algorithms, sync favorite flags,
//!   re-query, and rebuild case→alg relations.
//! - [`pull`] — re-query both collections and rewrite the local snapshots;
//!   the recovery step when a run died between mutation and re-query.
//!
//! Every mutation phase logs a line before and after; a failure anywhere
//! aborts the run with nothing retried or rolled back.

use std::collections::BTreeSet;

use cubesync_core::snapshot::{self, SnapshotFile};
use cubesync_core::types::{AlgSnapshot, AlgorithmRecord, CaseRecord, CaseSnapshot};
use cubesync_core::{dataset, SyncConfig};

use crate::batch::apply_batched;
use crate::error::{RemoteError, SyncError};
use crate::mapping;
use crate::reconcile::{self, FaveUpdate, RankUpdate};
use crate::relations;
use crate::remote::{Collection, RemoteStore, SortKey};
use crate::transform;

/// One of the pipeline's named operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Initialize,
    Incremental,
    Pull,
}

/// Per-phase counts for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub cases_created: usize,
    pub algs_created: usize,
    pub ranks_updated: usize,
    pub faves_updated: usize,
    pub orientation_groups: usize,
    pub relations_updated: usize,
    pub cases_pulled: usize,
    pub algs_pulled: usize,
}

/// What [`sync_incremental`] would do, computed purely from local files.
///
/// Backs `cubesync sync --dry-run` and the status display; needs no remote
/// access and writes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    pub to_create: Vec<AlgorithmRecord>,
    pub rank_updates: Vec<RankUpdate>,
    pub fave_updates: Vec<FaveUpdate>,
}

/// Run one pipeline operation.
pub fn run(
    config: &SyncConfig,
    remote: &dyn RemoteStore,
    operation: Operation,
) -> Result<SyncReport, SyncError> {
    match operation {
        Operation::Initialize => initialize(config, remote),
        Operation::Incremental => sync_incremental(config, remote),
        Operation::Pull => pull(config, remote),
    }
}

// ---------------------------------------------------------------------------
// initialize
// ---------------------------------------------------------------------------

/// Populate both collections for algsets the remote has not seen yet.
///
/// Safe to re-run after the dataset grows another algset: already-added
/// algsets are detected from the remote case names and skipped wholesale.
pub fn initialize(config: &SyncConfig, remote: &dyn RemoteStore) -> Result<SyncReport, SyncError> {
    let cases = dataset::load_cases(&config.assets.dataset)?;

    let existing = query_case_snapshots(remote)?;
    let added = added_algsets(&existing);
    let fresh: Vec<CaseRecord> = cases
        .into_iter()
        .filter(|case| !added.contains(&case.algset))
        .collect();

    tracing::info!("adding {} cases", fresh.len());
    apply_batched(&fresh, config.batch_size, |case| {
        remote.create(Collection::Cases, mapping::case_properties(case))?;
        Ok(())
    })?;
    tracing::info!("{} cases added", fresh.len());

    let case_snapshot = SnapshotFile::new(query_case_snapshots(remote)?);
    snapshot::save(&config.assets.case_snapshot, &case_snapshot)?;
    let case_snaps = &case_snapshot.records;

    let groups = relations::orientation_groups(case_snaps, &config.orientation_algset);
    tracing::info!("linking {} orientation groups", groups.len());
    apply_batched(&groups, config.batch_size, |group| {
        remote.update(Collection::Cases, mapping::orientation_patch(group))?;
        Ok(())
    })?;

    let algs = transform::expand(&fresh, case_snaps)?;
    tracing::info!("adding {} algs", algs.len());
    apply_batched(&algs, config.batch_size, |alg| {
        remote.create(Collection::Algorithms, mapping::algorithm_properties(alg))?;
        Ok(())
    })?;
    tracing::info!("{} algs added", algs.len());

    let alg_snapshot = SnapshotFile::new(query_alg_snapshots(remote)?);
    snapshot::save(&config.assets.alg_snapshot, &alg_snapshot)?;

    Ok(SyncReport {
        cases_created: fresh.len(),
        algs_created: algs.len(),
        orientation_groups: groups.len(),
        ..Default::default()
    })
}

// ---------------------------------------------------------------------------
// sync_incremental
// ---------------------------------------------------------------------------

/// Reconcile the refreshed dataset against the cached remote state.
///
/// Phase order follows the collection dependencies: rank corrections and
/// creates first, then favorite flags, then a full re-query that both
/// refreshes the algorithm snapshot and feeds the case→alg relation
/// rebuild — so algorithms created this run land in their case's relation
/// immediately.
pub fn sync_incremental(
    config: &SyncConfig,
    remote: &dyn RemoteStore,
) -> Result<SyncReport, SyncError> {
    let cases = dataset::load_cases(&config.assets.dataset)?;
    let case_snapshot = snapshot::load::<CaseSnapshot>(&config.assets.case_snapshot)?;
    let current = transform::expand(&cases, &case_snapshot.records)?;
    let alg_snapshot = snapshot::load::<AlgSnapshot>(&config.assets.alg_snapshot)?;

    let diff = reconcile::diff_algorithms(&current, &alg_snapshot.records);

    tracing::info!("updating {} alg ranks", diff.to_update.len());
    apply_batched(&diff.to_update, config.batch_size, |update| {
        remote.update(Collection::Algorithms, mapping::rank_patch(update))?;
        Ok(())
    })?;
    tracing::info!("rank update done");

    tracing::info!("creating {} algs", diff.to_create.len());
    apply_batched(&diff.to_create, config.batch_size, |alg| {
        remote.create(Collection::Algorithms, mapping::algorithm_properties(alg))?;
        Ok(())
    })?;
    tracing::info!("create done");

    let favorites = snapshot::load_favorites(&config.assets.favorites)?;
    let fave_updates = reconcile::diff_favorites(&alg_snapshot.records, &favorites);
    tracing::info!("updating {} alg faves", fave_updates.len());
    apply_batched(&fave_updates, config.batch_size, |update| {
        remote.update(Collection::Algorithms, mapping::fave_patch(update))?;
        Ok(())
    })?;
    tracing::info!("fave update done");

    tracing::info!("querying algorithm collection");
    let fresh = SnapshotFile::new(query_alg_snapshots(remote)?);
    snapshot::save(&config.assets.alg_snapshot, &fresh)?;

    let links = relations::case_alg_relations(&case_snapshot.records, &fresh.records);
    tracing::info!("updating alg relations for {} cases", links.len());
    apply_batched(&links, config.batch_size, |link| {
        remote.update(Collection::Cases, mapping::alg_relation_patch(link))?;
        Ok(())
    })?;
    tracing::info!("alg relations updated");

    Ok(SyncReport {
        algs_created: diff.to_create.len(),
        ranks_updated: diff.to_update.len(),
        faves_updated: fave_updates.len(),
        relations_updated: links.len(),
        ..Default::default()
    })
}

// ---------------------------------------------------------------------------
// pull
// ---------------------------------------------------------------------------

/// Re-query both collections and rewrite the local snapshots.
pub fn pull(config: &SyncConfig, remote: &dyn RemoteStore) -> Result<SyncReport, SyncError> {
    tracing::info!("querying case collection");
    let cases = SnapshotFile::new(query_case_snapshots(remote)?);
    snapshot::save(&config.assets.case_snapshot, &cases)?;

    tracing::info!("querying algorithm collection");
    let algs = SnapshotFile::new(query_alg_snapshots(remote)?);
    snapshot::save(&config.assets.alg_snapshot, &algs)?;

    Ok(SyncReport {
        cases_pulled: cases.records.len(),
        algs_pulled: algs.records.len(),
        ..Default::default()
    })
}

// ---------------------------------------------------------------------------
// plan (dry-run)
// ---------------------------------------------------------------------------

/// Compute the incremental diff from local files only.
pub fn plan_incremental(config: &SyncConfig) -> Result<SyncPlan, SyncError> {
    let cases = dataset::load_cases(&config.assets.dataset)?;
    let case_snapshot = snapshot::load::<CaseSnapshot>(&config.assets.case_snapshot)?;
    let current = transform::expand(&cases, &case_snapshot.records)?;
    let alg_snapshot = snapshot::load::<AlgSnapshot>(&config.assets.alg_snapshot)?;
    let favorites = snapshot::load_favorites(&config.assets.favorites)?;

    let diff = reconcile::diff_algorithms(&current, &alg_snapshot.records);
    let fave_updates = reconcile::diff_favorites(&alg_snapshot.records, &favorites);

    Ok(SyncPlan {
        to_create: diff.to_create,
        rank_updates: diff.to_update,
        fave_updates,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn query_case_snapshots(remote: &dyn RemoteStore) -> Result<Vec<CaseSnapshot>, SyncError> {
    let records = remote.query_all(Collection::Cases, &[SortKey::asc("name")])?;
    let snapshots = records
        .iter()
        .map(mapping::parse_case_snapshot)
        .collect::<Result<Vec<_>, RemoteError>>()?;
    Ok(snapshots)
}

fn query_alg_snapshots(remote: &dyn RemoteStore) -> Result<Vec<AlgSnapshot>, SyncError> {
    let records = remote.query_all(
        Collection::Algorithms,
        &[SortKey::asc("name"), SortKey::asc("rank")],
    )?;
    let snapshots = records
        .iter()
        .map(mapping::parse_alg_snapshot)
        .collect::<Result<Vec<_>, RemoteError>>()?;
    Ok(snapshots)
}

/// Algset prefixes already present remotely.
///
/// Every algset's first case is named `<algset>01`, so the set of names
/// ending in `01` minus that suffix is the set of added algsets.
fn added_algsets(snapshots: &[CaseSnapshot]) -> BTreeSet<String> {
    snapshots
        .iter()
        .filter_map(|snap| {
            snap.name
                .as_str()
                .strip_suffix("01")
                .map(|prefix| prefix.to_string())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    use tempfile::TempDir;

    use cubesync_core::config::{AssetPaths, RemoteConfig};
    use cubesync_core::error::StoreError;
    use cubesync_core::types::{CaseName, RemoteId};

    use super::*;
    use crate::remote::{NewRecord, RecordPatch, RemoteRecord};

    // -- in-memory remote ---------------------------------------------------

    #[derive(Default)]
    struct MockState {
        next_id: usize,
        cases: Vec<RemoteRecord>,
        algs: Vec<RemoteRecord>,
    }

    #[derive(Default)]
    struct MockRemote {
        state: Mutex<MockState>,
    }

    impl MockRemote {
        fn records(&self, collection: Collection) -> Vec<RemoteRecord> {
            let state = self.state.lock().unwrap();
            match collection {
                Collection::Cases => state.cases.clone(),
                Collection::Algorithms => state.algs.clone(),
            }
        }

        fn record(&self, collection: Collection, id: &str) -> RemoteRecord {
            self.records(collection)
                .into_iter()
                .find(|record| record.remote_id.0 == id)
                .unwrap_or_else(|| panic!("no record '{id}'"))
        }
    }

    impl RemoteStore for MockRemote {
        fn create(
            &self,
            collection: Collection,
            record: NewRecord,
        ) -> Result<RemoteId, RemoteError> {
            let mut state = self.state.lock().unwrap();
            state.next_id += 1;
            let prefix = match collection {
                Collection::Cases => "case",
                Collection::Algorithms => "alg",
            };
            let id = RemoteId::from(format!("{prefix}-{}", state.next_id));
            let list = match collection {
                Collection::Cases => &mut state.cases,
                Collection::Algorithms => &mut state.algs,
            };
            list.push(RemoteRecord {
                remote_id: id.clone(),
                properties: record.properties,
            });
            Ok(id)
        }

        fn update(&self, collection: Collection, patch: RecordPatch) -> Result<(), RemoteError> {
            let mut state = self.state.lock().unwrap();
            let list = match collection {
                Collection::Cases => &mut state.cases,
                Collection::Algorithms => &mut state.algs,
            };
            let record = list
                .iter_mut()
                .find(|record| record.remote_id == patch.remote_id)
                .ok_or(RemoteError::Api {
                    status: 404,
                    body: format!("no record {}", patch.remote_id),
                })?;
            record.properties.extend(patch.properties);
            Ok(())
        }

        fn query_all(
            &self,
            collection: Collection,
            sorts: &[SortKey],
        ) -> Result<Vec<RemoteRecord>, RemoteError> {
            let mut records = self.records(collection);
            records.sort_by(|a, b| {
                for key in sorts {
                    let ordering = if key.field == "rank" {
                        mapping::number_value(a, "rank")
                            .unwrap_or(0)
                            .cmp(&mapping::number_value(b, "rank").unwrap_or(0))
                    } else {
                        mapping::plain_text(a, key.field)
                            .unwrap_or_default()
                            .cmp(&mapping::plain_text(b, key.field).unwrap_or_default())
                    };
                    let ordering = if key.ascending {
                        ordering
                    } else {
                        ordering.reverse()
                    };
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
                Ordering::Equal
            });
            Ok(records)
        }
    }

    // -- fixtures -----------------------------------------------------------

    const HEADER: &str =
        "name,algset,caseid,catalog,alg1,alg2,alg3,alg4,video,videoimg,color,orientation";

    fn test_config(dir: &Path) -> SyncConfig {
        SyncConfig {
            remote: RemoteConfig {
                base_url: "http://unused.invalid".to_string(),
                case_database_id: "case-db".to_string(),
                alg_database_id: "alg-db".to_string(),
            },
            assets: AssetPaths {
                dataset: dir.join("all_algs.csv"),
                case_snapshot: dir.join("case_snapshot.json"),
                alg_snapshot: dir.join("alg_snapshot.json"),
                favorites: dir.join("favorites.json"),
            },
            batch_size: 2,
            orientation_algset: "F2L".to_string(),
        }
    }

    fn write_dataset(config: &SyncConfig, rows: &[&str]) {
        let mut file = std::fs::File::create(&config.assets.dataset).unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
    }

    fn write_favorites(config: &SyncConfig, json: &str) {
        std::fs::write(&config.assets.favorites, json).unwrap();
    }

    fn row(name: &str, algset: &str, algs: [&str; 4]) -> String {
        format!(
            "{name},{algset},1,Basic,{},{},{},{},,,,Front",
            algs[0], algs[1], algs[2], algs[3]
        )
    }

    fn loaded_algs(path: &PathBuf) -> Vec<AlgSnapshot> {
        snapshot::load::<AlgSnapshot>(path).unwrap().records
    }

    // -- initialize ---------------------------------------------------------

    #[test]
    fn initialize_populates_both_collections_and_snapshots() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path());
        write_dataset(
            &config,
            &[
                &row("F2L01", "F2L", ["a1", "a2", "", ""]),
                &row("F2L01-a", "F2L", ["a1", "", "", ""]),
                &row("OLL01", "OLL", ["o1", "", "", ""]),
            ],
        );
        let remote = MockRemote::default();

        let report = initialize(&config, &remote).expect("initialize");

        assert_eq!(report.cases_created, 3);
        assert_eq!(report.algs_created, 4);
        assert_eq!(report.orientation_groups, 1);

        assert_eq!(remote.records(Collection::Cases).len(), 3);
        assert_eq!(remote.records(Collection::Algorithms).len(), 4);

        let case_snaps = snapshot::load::<CaseSnapshot>(&config.assets.case_snapshot)
            .unwrap()
            .records;
        let names: Vec<&str> = case_snaps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["F2L01", "F2L01-a", "OLL01"]);

        // The F2L01 owner got linked to itself and its orientation variant.
        let owner_id = &case_snaps[0].remote_id;
        let owner = remote.record(Collection::Cases, &owner_id.0);
        let members = owner.properties["allOrientations"]["relation"]
            .as_array()
            .unwrap()
            .len();
        assert_eq!(members, 2);

        let alg_snaps = loaded_algs(&config.assets.alg_snapshot);
        assert_eq!(alg_snaps.len(), 4);
        assert!(alg_snaps.iter().all(|snap| !snap.fave));
    }

    #[test]
    fn initialize_skips_algsets_already_added() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path());
        let remote = MockRemote::default();

        // F2L already lives remotely (its first case is present).
        let seeded = CaseRecord {
            name: CaseName::from("F2L01"),
            algset: "F2L".to_string(),
            case_id: "1".to_string(),
            catalog: "Basic".to_string(),
            alg1: "a1".to_string(),
            alg2: String::new(),
            alg3: String::new(),
            alg4: String::new(),
            video: String::new(),
            video_img: String::new(),
            color: String::new(),
            orientation: "Front".to_string(),
        };
        remote
            .create(Collection::Cases, mapping::case_properties(&seeded))
            .unwrap();

        write_dataset(
            &config,
            &[
                &row("F2L02", "F2L", ["b1", "", "", ""]),
                &row("OLL01", "OLL", ["o1", "o2", "", ""]),
            ],
        );

        let report = initialize(&config, &remote).expect("initialize");

        assert_eq!(report.cases_created, 1, "only the OLL case is new");
        assert_eq!(report.algs_created, 2);
        assert_eq!(remote.records(Collection::Cases).len(), 2);
        // The snapshot still mirrors the whole collection.
        let case_snaps = snapshot::load::<CaseSnapshot>(&config.assets.case_snapshot)
            .unwrap()
            .records;
        assert_eq!(case_snaps.len(), 2);
    }

    // -- sync_incremental ---------------------------------------------------

    /// Seed one OLL01 case with two ranked algorithms and pull snapshots.
    fn seed_incremental(config: &SyncConfig, remote: &MockRemote) -> (RemoteId, RemoteId, RemoteId) {
        write_dataset(config, &[&row("OLL01", "OLL", ["R U R'", "F R F'", "", ""])]);
        write_favorites(config, "[]");
        let case_id = remote
            .create(
                Collection::Cases,
                mapping::case_properties(&dataset::load_cases(&config.assets.dataset).unwrap()[0]),
            )
            .unwrap();
        let alg1 = remote
            .create(
                Collection::Algorithms,
                mapping::algorithm_properties(&AlgorithmRecord {
                    alg: "R U R'".to_string(),
                    rank: 1,
                    case_name: CaseName::from("OLL01"),
                    case_remote_id: case_id.clone(),
                }),
            )
            .unwrap();
        let alg2 = remote
            .create(
                Collection::Algorithms,
                mapping::algorithm_properties(&AlgorithmRecord {
                    alg: "F R F'".to_string(),
                    rank: 2,
                    case_name: CaseName::from("OLL01"),
                    case_remote_id: case_id.clone(),
                }),
            )
            .unwrap();
        pull(config, remote).expect("pull");
        (case_id, alg1, alg2)
    }

    #[test]
    fn incremental_noop_when_dataset_matches_snapshot() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path());
        let remote = MockRemote::default();
        seed_incremental(&config, &remote);

        let report = sync_incremental(&config, &remote).expect("sync");
        assert_eq!(report.algs_created, 0);
        assert_eq!(report.ranks_updated, 0);
        assert_eq!(report.faves_updated, 0);
        // Relations are rebuilt every run; one case, one update.
        assert_eq!(report.relations_updated, 1);
    }

    #[test]
    fn incremental_demotes_dropped_alg_and_fixes_rank() {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path());
        let remote = MockRemote::default();
        let (case_id, alg1, alg2) = seed_incremental(&config, &remote);

        // Dataset refresh dropped "R U R'" and promoted "F R F'" to rank 1.
        write_dataset(&config, &[&row("OLL01", "OLL", ["F R F'", "", "", ""])]);

        let report = sync_incremental(&config, &remote).expect("sync");
        assert_eq!(report.ranks_updated, 2);
        assert_eq!(report.algs_created, 0);

        let demoted = remote.record(Collection::Algorithms, &alg1.0);
        assert_eq!(demoted.properties["rank"], serde_json::json!({ "number": 5 }));
        let promoted = remote.record(Collection::Algorithms, &alg2.0);
        assert_eq!(promoted.properties["rank"], serde_json::json!({ "number": 1 }));

        // The refreshed snapshot carries the corrected ranks, so a second
        // run has nothing left to update.
        let again = sync_incremental(&config, &remote).expect("second sync");
        assert_eq!(again.ranks_updated, 0);

        // Relations follow rank order from the fresh query.
        let case = remote.record(Collection::Cases, &case_id.0);
        let members: Vec<&str> = case.properties["alg_relation"]["relation"]
            .as_array()
            .unwrap()
            .iter()
            .map(|member| member["id"].as_str().unwrap())
            .collect();
        assert_eq!(members, vec![alg2.0.as_str(), alg1.0.as_str()]);
    }

    #[test]
    fn incremental_creates_added_alg_and_links_it_same_run() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path());
        let remote = MockRemote::default();
        let (case_id, _, _) = seed_incremental(&config, &remote);

        write_dataset(
            &config,
            &[&row("OLL01", "OLL", ["R U R'", "F R F'", "S R S'", ""])],
        );

        let report = sync_incremental(&config, &remote).expect("sync");
        assert_eq!(report.algs_created, 1);
        assert_eq!(report.ranks_updated, 0);

        // The just-created algorithm appears in the case relation and in the
        // refreshed snapshot without a second run.
        let case = remote.record(Collection::Cases, &case_id.0);
        let members = case.properties["alg_relation"]["relation"]
            .as_array()
            .unwrap()
            .len();
        assert_eq!(members, 3);
        assert_eq!(loaded_algs(&config.assets.alg_snapshot).len(), 3);
    }

    #[test]
    fn incremental_syncs_favorite_flags_both_ways() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path());
        let remote = MockRemote::default();
        let (_, alg1, _) = seed_incremental(&config, &remote);

        write_favorites(&config, r#"[{"alg":"R U R'","algset":"OLL"}]"#);
        let report = sync_incremental(&config, &remote).expect("sync");
        assert_eq!(report.faves_updated, 1);
        let flagged = remote.record(Collection::Algorithms, &alg1.0);
        assert_eq!(
            flagged.properties["fave"],
            serde_json::json!({ "checkbox": true })
        );
        assert!(loaded_algs(&config.assets.alg_snapshot)
            .iter()
            .any(|snap| snap.fave));

        // Dropping the favorites entry flips it back.
        write_favorites(&config, "[]");
        let report = sync_incremental(&config, &remote).expect("second sync");
        assert_eq!(report.faves_updated, 1);
        let unflagged = remote.record(Collection::Algorithms, &alg1.0);
        assert_eq!(
            unflagged.properties["fave"],
            serde_json::json!({ "checkbox": false })
        );
    }

    #[test]
    fn incremental_creates_single_new_alg_from_empty_snapshot() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path());
        let remote = MockRemote::default();

        write_dataset(&config, &[&row("OLL01", "OLL", ["R U R'", "", "", ""])]);
        write_favorites(&config, "[]");
        remote
            .create(
                Collection::Cases,
                mapping::case_properties(&dataset::load_cases(&config.assets.dataset).unwrap()[0]),
            )
            .unwrap();
        pull(&config, &remote).expect("pull");

        let report = sync_incremental(&config, &remote).expect("sync");
        assert_eq!(report.algs_created, 1);
        assert_eq!(report.ranks_updated, 0);

        let created = &loaded_algs(&config.assets.alg_snapshot)[0];
        assert_eq!(created.alg, "R U R'");
        assert_eq!(created.rank, 1);
        assert_eq!(created.name, CaseName::from("OLL01"));
    }

    #[test]
    fn incremental_fails_without_case_snapshot() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path());
        write_dataset(&config, &[&row("OLL01", "OLL", ["R U R'", "", "", ""])]);

        let err = sync_incremental(&config, &MockRemote::default()).unwrap_err();
        assert!(matches!(
            err,
            SyncError::Store(StoreError::SnapshotNotFound { .. })
        ));
    }

    // -- pull ---------------------------------------------------------------

    #[test]
    fn pull_rewrites_both_snapshots() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path());
        let remote = MockRemote::default();
        seed_incremental(&config, &remote);

        // Clobber both snapshot files, then pull them back.
        std::fs::write(&config.assets.case_snapshot, "[]").unwrap();
        std::fs::write(&config.assets.alg_snapshot, "[]").unwrap();

        let report = pull(&config, &remote).expect("pull");
        assert_eq!(report.cases_pulled, 1);
        assert_eq!(report.algs_pulled, 2);
        assert_eq!(loaded_algs(&config.assets.alg_snapshot).len(), 2);
    }

    // -- plan ---------------------------------------------------------------

    #[test]
    fn plan_reports_pending_work_without_touching_the_remote() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path());
        let remote = MockRemote::default();
        seed_incremental(&config, &remote);

        write_dataset(
            &config,
            &[&row("OLL01", "OLL", ["F R F'", "S R S'", "", ""])],
        );
        write_favorites(&config, r#"[{"alg":"F R F'","algset":"OLL"}]"#);

        let plan = plan_incremental(&config).expect("plan");
        // "S R S'" is new; "R U R'" is demoted and "F R F'" re-ranked.
        assert_eq!(plan.to_create.len(), 1);
        assert_eq!(plan.rank_updates.len(), 2);
        assert_eq!(plan.fave_updates.len(), 1);
    }

    // -- added_algsets ------------------------------------------------------

    #[test]
    fn added_algsets_derive_from_first_case_names() {
        let snaps = vec![
            CaseSnapshot {
                name: CaseName::from("F2L01"),
                remote_id: RemoteId::from("a"),
            },
            CaseSnapshot {
                name: CaseName::from("F2L02"),
                remote_id: RemoteId::from("b"),
            },
            CaseSnapshot {
                name: CaseName::from("OLL01"),
                remote_id: RemoteId::from("c"),
            },
        ];
        let added = added_algsets(&snaps);
        assert_eq!(
            added.into_iter().collect::<Vec<_>>(),
            vec!["F2L".to_string(), "OLL".to_string()]
        );
    }
}

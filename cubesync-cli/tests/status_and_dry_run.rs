//! End-to-end checks for the commands that run without a remote:
//! `cubesync status` and `cubesync sync --dry-run`.

use std::io::Write;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const HEADER: &str =
    "name,algset,caseid,catalog,alg1,alg2,alg3,alg4,video,videoimg,color,orientation";

fn cubesync_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cubesync"));
    cmd.current_dir(dir);
    cmd
}

fn write_config(dir: &Path) {
    std::fs::write(
        dir.join("cubesync.yaml"),
        "\
remote:
  base_url: https://api.workspace.example/v1
  case_database_id: aaaa-1111
  alg_database_id: bbbb-2222
assets:
  dataset: all_algs.csv
  case_snapshot: case_snapshot.json
  alg_snapshot: alg_snapshot.json
  favorites: favorites.json
",
    )
    .expect("write config");
}

/// One synced OLL01 case with "R U R'" at rank 1, as legacy bare-array
/// snapshots written by the older tooling.
fn write_assets(dir: &Path, rows: &[&str]) {
    let mut file = std::fs::File::create(dir.join("all_algs.csv")).expect("create csv");
    writeln!(file, "{HEADER}").expect("header");
    for row in rows {
        writeln!(file, "{row}").expect("row");
    }
    std::fs::write(
        dir.join("case_snapshot.json"),
        r#"[{"name":"OLL01","remoteId":"case-1"}]"#,
    )
    .expect("case snapshot");
    std::fs::write(
        dir.join("alg_snapshot.json"),
        r#"[{"alg":"R U R'","rank":1,"name":"OLL01","fave":false,"remoteId":"alg-1"}]"#,
    )
    .expect("alg snapshot");
    std::fs::write(dir.join("favorites.json"), "[]").expect("favorites");
}

const IN_SYNC_ROW: &str = "OLL01,OLL,1,Dot,R U R',,,,,,,U";
const ADDED_ALG_ROW: &str = "OLL01,OLL,1,Dot,R U R',F R F',,,,,,U";

#[test]
fn status_fails_without_config() {
    let dir = TempDir::new().expect("tempdir");
    cubesync_cmd(dir.path())
        .arg("status")
        .assert()
        .failure()
        .stderr(contains("config"));
}

#[test]
fn status_reports_snapshots_and_in_sync() {
    let dir = TempDir::new().expect("tempdir");
    write_config(dir.path());
    write_assets(dir.path(), &[IN_SYNC_ROW]);

    cubesync_cmd(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(contains("cases"))
        .stdout(contains("algorithms"))
        .stdout(contains("in sync"));
}

#[test]
fn status_shows_pending_work_after_dataset_refresh() {
    let dir = TempDir::new().expect("tempdir");
    write_config(dir.path());
    write_assets(dir.path(), &[ADDED_ALG_ROW]);

    cubesync_cmd(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(contains("pending: 1 to create"));
}

#[test]
fn status_json_is_machine_readable() {
    let dir = TempDir::new().expect("tempdir");
    write_config(dir.path());
    write_assets(dir.path(), &[ADDED_ALG_ROW]);

    let output = cubesync_cmd(dir.path())
        .args(["status", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let payload: serde_json::Value =
        serde_json::from_slice(&output).expect("status --json must emit valid JSON");
    assert_eq!(payload["snapshots"][0]["collection"], "cases");
    assert_eq!(payload["snapshots"][0]["records"], 1);
    assert_eq!(payload["pending"]["to_create"], 1);
    assert_eq!(payload["pending"]["rank_updates"], 0);
}

#[test]
fn dry_run_reports_pending_create_and_writes_nothing() {
    let dir = TempDir::new().expect("tempdir");
    write_config(dir.path());
    write_assets(dir.path(), &[ADDED_ALG_ROW]);
    let snapshot_before =
        std::fs::read_to_string(dir.path().join("alg_snapshot.json")).expect("read snapshot");

    cubesync_cmd(dir.path())
        .args(["sync", "--dry-run"])
        .assert()
        .success()
        .stdout(contains("[dry-run]"))
        .stdout(contains("F R F'"));

    let snapshot_after =
        std::fs::read_to_string(dir.path().join("alg_snapshot.json")).expect("read snapshot");
    assert_eq!(
        snapshot_after, snapshot_before,
        "dry-run must not rewrite snapshots"
    );
}

#[test]
fn dry_run_with_nothing_pending_says_so() {
    let dir = TempDir::new().expect("tempdir");
    write_config(dir.path());
    write_assets(dir.path(), &[IN_SYNC_ROW]);

    cubesync_cmd(dir.path())
        .args(["sync", "--dry-run"])
        .assert()
        .success()
        .stdout(contains("nothing to do"));
}

#[test]
fn real_sync_without_token_fails_before_any_mutation() {
    let dir = TempDir::new().expect("tempdir");
    write_config(dir.path());
    write_assets(dir.path(), &[ADDED_ALG_ROW]);

    cubesync_cmd(dir.path())
        .env_remove("CUBESYNC_TOKEN")
        .arg("sync")
        .assert()
        .failure()
        .stderr(contains("CUBESYNC_TOKEN"));
}

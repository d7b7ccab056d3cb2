//! End-to-end tests that exercise the binary the way a shell user would.
//! Each test gets its own data file via TASKMAN_DATA_FILE, and HOME is
//! pointed at the temp dir so no real config is picked up.

use std::process::{Command, Output};

use tempfile::TempDir;

fn run(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tasks"))
        .args(args)
        .env("TASKMAN_DATA_FILE", dir.path().join("tasks.json"))
        .env("HOME", dir.path())
        .output()
        .expect("failed to run tasks binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn add_then_list() {
    let dir = TempDir::new().unwrap();
    let added = run(&dir, &["add", "buy milk"]);
    assert!(added.status.success());
    assert!(stdout(&added).contains("Added task [1]: buy milk"));

    let listed = run(&dir, &["list"]);
    assert!(listed.status.success());
    let out = stdout(&listed);
    assert!(out.contains("buy milk"));
    assert!(out.contains("1 pending, 0 completed (1 total)"));
}

#[test]
fn add_creates_the_data_file() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["add", "first"]);

    let raw = std::fs::read_to_string(dir.path().join("tasks.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["next_id"], 2);
    assert_eq!(json["tasks"][0]["text"], "first");
    assert_eq!(json["tasks"][0]["priority"], "normal");
}

#[test]
fn add_rejects_blank_text() {
    let dir = TempDir::new().unwrap();
    let output = run(&dir, &["add", "   "]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("cannot be empty"));
}

#[test]
fn add_with_unknown_priority_warns_and_falls_back() {
    let dir = TempDir::new().unwrap();
    let output = run(&dir, &["add", "thing", "--priority", "urgent"]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("unknown priority 'urgent'"));

    let raw = std::fs::read_to_string(dir.path().join("tasks.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["tasks"][0]["priority"], "normal");
}

#[test]
fn complete_marks_and_is_idempotent_about_reporting() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["add", "a"]);

    let first = run(&dir, &["complete", "1"]);
    assert!(first.status.success());
    assert!(stdout(&first).contains("Completed task [1]"));

    let second = run(&dir, &["complete", "1"]);
    assert!(second.status.success());
    assert!(stdout(&second).contains("already completed"));
}

#[test]
fn complete_unknown_id_fails() {
    let dir = TempDir::new().unwrap();
    let output = run(&dir, &["complete", "99"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("no task with ID 99"));
}

#[test]
fn delete_removes_and_never_reuses_the_id() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["add", "a"]);
    run(&dir, &["add", "b"]);

    let deleted = run(&dir, &["delete", "1"]);
    assert!(deleted.status.success());

    run(&dir, &["add", "c"]);
    let raw = std::fs::read_to_string(dir.path().join("tasks.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let ids: Vec<u64> = json["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![2, 3]);
}

#[test]
fn delete_unknown_id_fails() {
    let dir = TempDir::new().unwrap();
    let output = run(&dir, &["delete", "7"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("no task with ID 7"));
}

#[test]
fn sort_mode_persists_and_reorders_the_list() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["add", "low thing", "--priority", "low"]);
    run(&dir, &["add", "big thing", "--priority", "high"]);

    let sorted = run(&dir, &["sort", "priority"]);
    assert!(sorted.status.success());

    let raw = std::fs::read_to_string(dir.path().join("tasks.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["sort_mode"], "priority");

    let out = stdout(&run(&dir, &["list"]));
    let high_pos = out.find("big thing").unwrap();
    let low_pos = out.find("low thing").unwrap();
    assert!(high_pos < low_pos);
}

#[test]
fn sort_rejects_unknown_mode() {
    let dir = TempDir::new().unwrap();
    let output = run(&dir, &["sort", "chronological"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("unknown sort mode"));
}

#[test]
fn list_filters() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["add", "open one"]);
    run(&dir, &["add", "done one"]);
    run(&dir, &["complete", "2"]);

    let pending = stdout(&run(&dir, &["list", "--filter", "pending"]));
    assert!(pending.contains("open one"));
    assert!(!pending.contains("done one"));

    let completed = stdout(&run(&dir, &["list", "--filter", "completed"]));
    assert!(completed.contains("done one"));
    assert!(!completed.contains("open one"));
}

#[test]
fn count_plain_and_json() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["add", "a"]);
    run(&dir, &["add", "b"]);
    run(&dir, &["complete", "1"]);

    let plain = stdout(&run(&dir, &["count"]));
    assert!(plain.contains("1 pending, 1 completed (2 total)"));

    let pending_only = stdout(&run(&dir, &["count", "pending"]));
    assert_eq!(pending_only.trim(), "1");

    let json_out = stdout(&run(&dir, &["count", "--json"]));
    let json: serde_json::Value = serde_json::from_str(&json_out).unwrap();
    assert_eq!(json["pending"], 1);
    assert_eq!(json["completed"], 1);
    assert_eq!(json["total"], 2);

    // positional spelling of the JSON shape
    let alias_out = stdout(&run(&dir, &["count", "all_json"]));
    let alias: serde_json::Value = serde_json::from_str(&alias_out).unwrap();
    assert_eq!(alias, json);
}

#[test]
fn list_json_round_trips() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["add", "machine readable"]);

    let out = stdout(&run(&dir, &["list", "--json"]));
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["text"], "machine readable");
}

#[test]
fn malformed_data_file_degrades_to_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("tasks.json"), "{not json").unwrap();

    let listed = run(&dir, &["list"]);
    assert!(listed.status.success());
    assert!(stdout(&listed).contains("No tasks."));
}

use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Config pointing the definitions store into the temp dir
fn write_config(dir: &Path, extra: &str) -> PathBuf {
    let path = dir.join("config.toml");
    let content = format!(
        "[definitions]\ndirectory = '{}'\n\n[ingest]\nworker_threads = 2\n{}",
        dir.join("defs").display(),
        extra
    );
    fs::write(&path, content).unwrap();
    path
}

fn data_dir(dir: &Path) -> PathBuf {
    let data = dir.join("data");
    fs::create_dir_all(&data).unwrap();
    data
}

fn json_stdout(cmd: &mut assert_cmd::Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("Invalid JSON output")
}

#[test]
fn test_help_lists_subcommands() {
    let mut cmd = assert_cmd::cargo_bin_cmd!("triageset");
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("scan"))
        .stdout(predicate::str::contains("sets"))
        .stdout(predicate::str::contains("filters"))
        .stdout(predicate::str::contains("--config"));
}

#[test]
fn test_scan_help_describes_options() {
    let mut cmd = assert_cmd::cargo_bin_cmd!("triageset");
    cmd.args(["scan", "--help"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--set"))
        .stdout(predicate::str::contains("--filter"))
        .stdout(predicate::str::contains("--threads"))
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn test_version() {
    let mut cmd = assert_cmd::cargo_bin_cmd!("triageset");
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::starts_with("triageset "));
}

#[test]
fn test_long_version_includes_revision() {
    let mut cmd = assert_cmd::cargo_bin_cmd!("triageset");
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::is_match(r"^triageset \S+ \(\S+\)").unwrap());
}

#[test]
fn test_sets_list_json_shows_standard_sets() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "");

    let mut cmd = assert_cmd::cargo_bin_cmd!("triageset");
    cmd.arg("--config").arg(&config).args(["sets", "list", "--json"]);
    let json = json_stdout(&mut cmd);

    let names: Vec<&str> = json
        .as_array()
        .expect("array of sets")
        .iter()
        .map(|set| set["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Cloud Storage", "Disk Images", "Encryption Programs"]);
    assert!(json[0]["standard"].as_bool().unwrap());
    assert!(!json[0]["rules"].as_array().unwrap().is_empty());
}

#[test]
fn test_sets_reconcile_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "");

    let mut first = assert_cmd::cargo_bin_cmd!("triageset");
    first.arg("--config").arg(&config).args(["sets", "reconcile"]);
    first
        .assert()
        .success()
        .stdout(predicate::str::contains("Added standard set: Disk Images"));

    let mut second = assert_cmd::cargo_bin_cmd!("triageset");
    second.arg("--config").arg(&config).args(["sets", "reconcile"]);
    second
        .assert()
        .success()
        .stdout(predicate::str::contains("up to date"));
}

#[test]
fn test_filters_list_includes_standard_filters() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "");

    let mut cmd = assert_cmd::cargo_bin_cmd!("triageset");
    cmd.arg("--config").arg(&config).args(["filters", "list"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("All Files and Directories (Not Unallocated Space)"))
        .stdout(predicate::str::contains("All Files, Directories, and Unallocated Space"));
}

#[test]
fn test_scan_json_reports_disk_image() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "");
    let data = data_dir(temp.path());
    fs::write(data.join("image.iso"), vec![0u8; 2 * 1024 * 1024]).unwrap();
    fs::write(data.join("small.iso"), b"tiny").unwrap();
    fs::write(data.join("notes.txt"), b"text").unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("triageset");
    cmd.arg("--config").arg(&config).arg("scan").arg(&data).arg("--json");
    let json = json_stdout(&mut cmd);

    let hits = json["hits"].as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert!(hits[0]["path"].as_str().unwrap().ends_with("image.iso"));
    assert_eq!(hits[0]["set"], "Disk Images");
    assert_eq!(hits[0]["rule"], "Disk image extensions");

    let summary = &json["summary"];
    assert_eq!(summary["discovered"], 3);
    assert_eq!(summary["hits"], 1);
    assert!(summary.get("interrupted").is_none());
    assert_eq!(json["ingest_filter"], "All Files and Directories (Not Unallocated Space)");
}

#[test]
fn test_scan_set_selection_limits_sets() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "");
    let data = data_dir(temp.path());
    fs::write(data.join("image.iso"), vec![0u8; 2 * 1024 * 1024]).unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("triageset");
    cmd.arg("--config")
        .arg(&config)
        .arg("scan")
        .arg(&data)
        .args(["--set", "Cloud*", "--json"]);
    let json = json_stdout(&mut cmd);

    assert_eq!(json["sets"], serde_json::json!(["Cloud Storage"]));
    assert!(json["hits"].as_array().unwrap().is_empty());
}

#[test]
fn test_scan_uses_custom_sets_from_store() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "");
    let defs = temp.path().join("defs");
    fs::create_dir_all(&defs).unwrap();
    fs::write(
        defs.join("interesting_file_sets.toml"),
        r#"format_version = 1

[[set]]
name = "Docs"

[[set.rule]]
id = "docs-01"
name = "Word documents"

[[set.rule.condition]]
kind = "name"
scope = "extension"
pattern = "docx"
"#,
    )
    .unwrap();

    let data = data_dir(temp.path());
    fs::write(data.join("a.docx"), b"a").unwrap();
    fs::write(data.join("b.DOCX"), b"b").unwrap();
    fs::write(data.join("c.pdf"), b"c").unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("triageset");
    cmd.arg("--config").arg(&config).arg("scan").arg(&data).arg("--quiet");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Docs:"))
        .stdout(predicate::str::contains("a.docx (Word documents)"))
        .stdout(predicate::str::contains("b.DOCX (Word documents)"))
        .stdout(predicate::str::contains("c.pdf").not())
        .stdout(predicate::str::contains("Scan Summary:"));
}

#[test]
fn test_scan_empty_directory() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "");
    let data = data_dir(temp.path());

    let mut cmd = assert_cmd::cargo_bin_cmd!("triageset");
    cmd.arg("--config").arg(&config).arg("scan").arg(&data).arg("-q");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No interesting files found."));
}

#[test]
fn test_scan_unknown_filter_fails() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "");
    let data = data_dir(temp.path());

    let mut cmd = assert_cmd::cargo_bin_cmd!("triageset");
    cmd.arg("--config")
        .arg(&config)
        .arg("scan")
        .arg(&data)
        .args(["--filter", "No Such Filter"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown ingest filter: No Such Filter"));
}

#[test]
fn test_scan_missing_path_fails() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "");

    let mut cmd = assert_cmd::cargo_bin_cmd!("triageset");
    cmd.arg("--config")
        .arg(&config)
        .arg("scan")
        .arg(temp.path().join("missing"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Path does not exist"));
}

#[test]
fn test_invalid_glob_selection_fails() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "");
    let data = data_dir(temp.path());

    let mut cmd = assert_cmd::cargo_bin_cmd!("triageset");
    cmd.arg("--config").arg(&config).arg("scan").arg(&data).args(["--set", "Cloud["]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid glob pattern"));
}

#[test]
fn test_invalid_config_fails() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.toml");
    fs::write(&config, "[ingest]\nworker_threads = 0\n").unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("triageset");
    cmd.arg("--config").arg(&config).args(["sets", "list"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

//! Command-line tests for the `version-solver` binary.

use assert_cmd::Command;
use predicates::prelude::*;

const CATALOG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/wordpress_versions.json");

fn cmd() -> Command {
    Command::cargo_bin("version-solver").unwrap()
}

#[test]
fn test_catalog_paths() {
    cmd()
        .args(["catalog", "paths", "--catalog", CATALOG])
        .assert()
        .success()
        .stdout("readme.html\nstyle.css\nwp-includes/js/file.js\n");
}

#[test]
fn test_catalog_list() {
    cmd()
        .args(["catalog", "list", "--catalog", CATALOG])
        .assert()
        .success()
        .stdout(predicate::str::contains("wordpress (unittest): 2 versions"))
        .stdout(predicate::str::contains("1.0"))
        .stdout(predicate::str::contains("2.0"));
}

#[test]
fn test_catalog_list_json() {
    let output = cmd()
        .args(["catalog", "list", "--catalog", CATALOG, "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["key"], "wordpress");
    assert_eq!(json["versions"][1]["version"], "2.0");
    assert_eq!(json["versions"][1]["signatures"], 3);
}

#[test]
fn test_catalog_show() {
    cmd()
        .args(["catalog", "show", "1.0", "--catalog", CATALOG])
        .assert()
        .success()
        .stdout(predicate::str::contains("f1310670f16b3f4d8695968adb55ff8e"))
        .stdout(predicate::str::contains("MD5"));
}

#[test]
fn test_catalog_show_unknown_version() {
    cmd()
        .args(["catalog", "show", "9.9", "--catalog", CATALOG])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Version '9.9' not found"));
}

#[test]
fn test_catalog_export() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("export.json");

    cmd()
        .args(["catalog", "export"])
        .arg(&output)
        .args(["--catalog", CATALOG])
        .assert()
        .success();

    let exported = std::fs::read_to_string(&output).unwrap();
    let catalog = version_solver::VersionList::from_json(&exported).unwrap();
    assert_eq!(catalog.len(), 2);
}

#[test]
fn test_missing_catalog_fails() {
    cmd()
        .args(["catalog", "paths", "--catalog", "/nonexistent/versions.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Catalog not found"));
}

#[test]
fn test_malformed_catalog_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(
        &path,
        r#"{"key": "wordpress", "producer": "t", "versions": [
            {"version": "1.0", "signatures": [{"path": "a.js", "hash": "1234", "algo": "CRC32"}]}
        ]}"#,
    )
    .unwrap();

    cmd()
        .args(["catalog", "list", "--catalog"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed catalog"));
}

#[test]
fn test_identify_requires_catalog() {
    cmd()
        .args(["identify", "http://127.0.0.1:9/"])
        .assert()
        .failure();
}

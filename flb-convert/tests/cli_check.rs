use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

mod common;

use common::{fixture, flb_convert};

#[test]
fn check_reports_problems_without_writing() {
    let dir = tempdir().expect("tempdir");

    flb_convert(dir.path())
        .arg("check")
        .arg(fixture("fixtures/broken.conf"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "ERROR line 2: cannot allocate, process line: flush 1",
        ))
        .stdout(predicate::str::contains(
            "ERROR line 7: cannot process attribute: read_from_head",
        ))
        .stdout(predicate::str::contains("errors=3"));

    assert!(!fixture("fixtures/broken.yaml").exists());
}

#[test]
fn check_strict_fails_on_errors() {
    let dir = tempdir().expect("tempdir");

    flb_convert(dir.path())
        .arg("check")
        .arg("--strict")
        .arg(fixture("fixtures/broken.conf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("strict mode failed: 3 error diagnostics"));
}

#[test]
fn check_strict_passes_clean_file() {
    let dir = tempdir().expect("tempdir");

    flb_convert(dir.path())
        .arg("check")
        .arg("--strict")
        .arg(fixture("fixtures/basic.conf"))
        .assert()
        .success()
        .stdout(predicate::str::contains("no diagnostics"));
}

#[test]
fn check_json_output() {
    let dir = tempdir().expect("tempdir");

    let assert = flb_convert(dir.path())
        .arg("check")
        .arg(fixture("fixtures/includes.conf"))
        .arg("--format")
        .arg("json")
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf-8 stdout");
    let outcomes: Value = serde_json::from_str(&stdout).expect("json stdout");
    let first = &outcomes[0];
    assert!(first["output"].is_null());
    assert_eq!(first["summary"]["includes"], 2);
    assert_eq!(first["summary"]["warnings"], 2);
}

#[test]
fn check_missing_file_fails() {
    let dir = tempdir().expect("tempdir");

    flb_convert(dir.path())
        .arg("check")
        .arg(dir.path().join("nope.conf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 of 1 files could not be read"));
}

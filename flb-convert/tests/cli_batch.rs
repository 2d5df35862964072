use std::fs;

use predicates::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

mod common;

use common::{copy_fixture, fixture, flb_convert, path_as_str};

#[test]
fn conversion_list_in_working_directory_converts_every_entry() {
    let dir = tempdir().expect("tempdir");
    copy_fixture("basic.conf", dir.path());
    copy_fixture("includes.conf", dir.path());
    fs::write(
        dir.path().join("conversion.list"),
        "basic.conf\n\n# comment\nincludes.conf\n",
    )
    .expect("write list");

    flb_convert(dir.path())
        .arg("convert")
        .arg("ignored-argument.conf")
        .assert()
        .success()
        .stdout(predicate::str::contains("basic.yaml"))
        .stdout(predicate::str::contains("includes.yaml"));

    let basic = fs::read_to_string(dir.path().join("basic.yaml")).expect("basic.yaml written");
    let includes =
        fs::read_to_string(dir.path().join("includes.yaml")).expect("includes.yaml written");
    assert_eq!(
        basic,
        fs::read_to_string(fixture("fixtures/basic.yaml")).expect("expected basic yaml")
    );
    assert_eq!(
        includes,
        fs::read_to_string(fixture("fixtures/includes.yaml")).expect("expected includes yaml")
    );
    assert!(!includes.contains("cpu"));
    assert!(!includes.contains("modify"));
    assert!(!dir.path().join("ignored-argument.yaml").exists());
}

#[test]
fn path_prefix_locates_list_and_sources() {
    let dir = tempdir().expect("tempdir");
    let classic = dir.path().join("classic");
    fs::create_dir(&classic).expect("mkdir");
    copy_fixture("basic.conf", &classic);
    fs::write(classic.join("conversion.list"), "basic.conf\n").expect("write list");

    flb_convert(dir.path())
        .env("FLB_PATH_PREFIX", path_as_str(&classic))
        .arg("convert")
        .assert()
        .success();

    assert!(classic.join("basic.yaml").exists());
}

#[test]
fn explicit_list_with_failing_entry_continues() {
    let dir = tempdir().expect("tempdir");
    copy_fixture("basic.conf", dir.path());
    let list = dir.path().join("batch.list");
    fs::write(&list, "missing.conf\nbasic.conf\n").expect("write list");

    flb_convert(dir.path())
        .arg("convert")
        .arg("--list")
        .arg(path_as_str(&list))
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.conf"))
        .stderr(predicate::str::contains("1 of 2 conversions failed"));

    assert!(dir.path().join("basic.yaml").exists());
}

#[test]
fn classic_file_from_environment() {
    let dir = tempdir().expect("tempdir");
    copy_fixture("multi-service.conf", dir.path());

    flb_convert(dir.path())
        .env("FLBClassicFN", "multi-service.conf")
        .arg("convert")
        .assert()
        .success();

    let converted =
        fs::read_to_string(dir.path().join("multi-service.yaml")).expect("converted file");
    assert!(converted.starts_with("service:\n  flush: 1\n  flush: 5\n  log_level: info\n"));
    assert!(!converted.contains("daemon"));
}

#[test]
fn settings_file_enables_idiomatic_naming() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("svc.conf");
    fs::write(&input, "[SERVICE]\n    Log_Level debug\n").expect("write src");
    let settings = dir.path().join("flb-convert.toml");
    fs::write(&settings, "idiomatic_naming = true\n").expect("write settings");

    flb_convert(dir.path())
        .arg("--config")
        .arg(path_as_str(&settings))
        .arg("convert")
        .arg(path_as_str(&input))
        .assert()
        .success();

    let converted = fs::read_to_string(dir.path().join("svc.yaml")).expect("converted file");
    assert_eq!(converted, "service:\n  logLevel: debug\n\npipeline:\n");
}

#[test]
fn invalid_settings_file_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let settings = dir.path().join("flb-convert.toml");
    fs::write(&settings, "idiomatic_naming = \"maybe\"\n").expect("write settings");

    flb_convert(dir.path())
        .arg("--config")
        .arg(path_as_str(&settings))
        .arg("convert")
        .arg("anything.conf")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse settings file"));
}

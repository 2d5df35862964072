#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;

pub fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

pub fn path_as_str(path: &Path) -> &str {
    path.to_str().expect("path should be valid utf-8")
}

/// Command isolated from the caller's FLB_* settings and colour preferences.
pub fn flb_convert(cwd: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("flb-convert"));
    cmd.current_dir(cwd)
        .env_remove("FLB_CONVERT_DEBUG")
        .env_remove("FLB_REPORT_FILE")
        .env_remove("FLB_IDIOMATICFORM")
        .env_remove("FLB_PATH_PREFIX")
        .env_remove("FLBClassicFN")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .env("CLICOLOR", "0");
    cmd
}

/// Copy a fixture into `dir` and return the copy's path.
pub fn copy_fixture(name: &str, dir: &Path) -> PathBuf {
    let target = dir.join(name);
    fs::copy(fixture(&format!("fixtures/{name}")), &target).expect("copy fixture");
    target
}

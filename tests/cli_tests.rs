//! CLI integration tests using the real binary

mod common;

use assert_cmd::Command;
use common::{APP_IMPORT_PATH, copy_fixtures};
use predicates::prelude::*;
use std::fs;

#[allow(deprecated)]
fn deploy_cmd() -> Command {
    let mut cmd = Command::cargo_bin("kodegen_bundler_deploy").unwrap();
    for var in [
        "KODEGEN_SRC_ROOT",
        "KODEGEN_RUNTIME_IMPORT_PATH",
        "KODEGEN_RUNTIME_PATH",
        "KODEGEN_TEMPLATES_DIR",
        "KODEGEN_BUILD_PROFILE",
        "KODEGEN_TARGET_DIR",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_help_lists_build() {
    deploy_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build"));
}

#[test]
fn test_build_help_warns_about_deletion() {
    deploy_cmd()
        .args(["build", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("will be completely deleted"));
}

#[test]
fn test_missing_arguments_print_usage() {
    let out = tempfile::tempdir().unwrap();

    deploy_cmd()
        .current_dir(out.path())
        .args(["build", APP_IMPORT_PATH])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "build [import path] [target path] [run mode]",
        ));

    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn test_foreign_destination_aborts() {
    let src = copy_fixtures();
    let dest = tempfile::tempdir().unwrap();
    fs::write(dest.path().join("notes.txt"), "keep").unwrap();

    deploy_cmd()
        .arg("build")
        .arg(APP_IMPORT_PATH)
        .arg(dest.path())
        .arg("--src-root")
        .arg(src.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "does not look like a build directory",
        ));

    assert_eq!(fs::read_to_string(dest.path().join("notes.txt")).unwrap(), "keep");
}

#[test]
fn test_invalid_import_path_is_rejected() {
    let out = tempfile::tempdir().unwrap();

    deploy_cmd()
        .arg("build")
        .arg("../escape")
        .arg(out.path().join("bundle"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid arguments"));

    assert!(!out.path().join("bundle").exists());
}

#[test]
fn test_unknown_application_is_rejected() {
    let src = copy_fixtures();
    let out = tempfile::tempdir().unwrap();

    deploy_cmd()
        .arg("build")
        .arg("example.com/missing")
        .arg(out.path().join("bundle"))
        .arg("--src-root")
        .arg(src.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Application not found"));

    assert!(!out.path().join("bundle").exists());
}

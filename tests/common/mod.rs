//! Shared helpers for packaging integration tests
#![allow(dead_code)]

use kodegen_bundler_deploy::BuildError;
use kodegen_bundler_deploy::bundler::{BuildArtifact, BuildHarness};
use kodegen_bundler_deploy::environment::{Environment, EnvironmentOptions};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

pub const APP_IMPORT_PATH: &str = "example.com/app";

/// Fixture source root holding `example.com/app` and `kodegen.ai/runtime`
pub fn fixture_src_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("src")
}

/// Copy the fixture source root into a fresh temp directory
pub fn copy_fixtures() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let from = fixture_src_root();
    for entry in walkdir::WalkDir::new(&from) {
        let entry = entry.unwrap();
        let dest = dir.path().join(entry.path().strip_prefix(&from).unwrap());
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&dest).unwrap();
        } else {
            std::fs::copy(entry.path(), &dest).unwrap();
        }
    }
    dir
}

pub fn options_for(src_root: &Path) -> EnvironmentOptions {
    EnvironmentOptions {
        src_root: Some(src_root.to_path_buf()),
        ..Default::default()
    }
}

/// Sorted file paths under `root`, relative to it
pub fn relative_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().strip_prefix(root).unwrap().to_path_buf())
        .collect();
    files.sort();
    files
}

/// Build harness that writes a placeholder executable instead of compiling
pub struct StubHarness {
    binary_path: PathBuf,
    output_dir: Option<PathBuf>,
    calls: AtomicUsize,
}

impl StubHarness {
    pub fn new(build_dir: &Path, binary_name: &str) -> Self {
        Self {
            binary_path: build_dir.join(binary_name),
            output_dir: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Reports `dir` as the directory the build writes into
    pub fn with_output_dir(mut self, dir: &Path) -> Self {
        self.output_dir = Some(dir.to_path_buf());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl BuildHarness for StubHarness {
    async fn build(&self, _env: &Environment) -> Result<BuildArtifact, BuildError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::fs::write(&self.binary_path, "#!/bin/sh\necho stub\n").unwrap();
        Ok(BuildArtifact::new(&self.binary_path))
    }

    fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }
}

/// Build harness whose compilation always fails
pub struct FailingHarness;

impl BuildHarness for FailingHarness {
    async fn build(&self, _env: &Environment) -> Result<BuildArtifact, BuildError> {
        Err(BuildError::Failed {
            command: "cargo build".to_string(),
            code: Some(101),
        })
    }
}

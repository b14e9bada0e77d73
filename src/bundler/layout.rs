//! Destination paths of a bundle.

use super::builder::BuildArtifact;
use super::launcher::{BATCH_LAUNCHER, POSIX_LAUNCHER};
use crate::environment::Environment;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Directory under the bundle root that mirrors import paths
pub const SRC_DIR: &str = "src";

/// Every location a bundle writes, derived from destination, environment and artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleLayout {
    root: PathBuf,
    binary: PathBuf,
    runtime_dir: PathBuf,
    app_dir: PathBuf,
    posix_launcher: PathBuf,
    batch_launcher: PathBuf,
}

impl BundleLayout {
    pub fn new(root: &Path, env: &Environment, artifact: &BuildArtifact) -> Result<Self> {
        let src_dir = root.join(SRC_DIR);
        Ok(Self {
            binary: root.join(artifact.binary_name()?),
            runtime_dir: env.runtime_import_path().mirror_under(&src_dir),
            app_dir: env.app_import_path().mirror_under(&src_dir),
            posix_launcher: root.join(POSIX_LAUNCHER),
            batch_launcher: root.join(BATCH_LAUNCHER),
            root: root.to_path_buf(),
        })
    }

    /// Bundle root (the destination directory)
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the executable is copied to
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Mirrored runtime support library root
    pub fn runtime_dir(&self) -> &Path {
        &self.runtime_dir
    }

    pub fn runtime_conf(&self) -> PathBuf {
        self.runtime_dir.join("conf")
    }

    pub fn runtime_views(&self) -> PathBuf {
        self.runtime_dir.join("views")
    }

    /// Mirrored application source root
    pub fn app_dir(&self) -> &Path {
        &self.app_dir
    }

    pub fn posix_launcher(&self) -> &Path {
        &self.posix_launcher
    }

    pub fn batch_launcher(&self) -> &Path {
        &self.batch_launcher
    }
}

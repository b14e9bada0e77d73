//! Build harness seam.

use crate::environment::Environment;
use crate::error::{BuildError, DeployError, Result};
use std::path::{Path, PathBuf};

/// Compiled executable produced by a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildArtifact {
    binary_path: PathBuf,
}

impl BuildArtifact {
    pub fn new(binary_path: impl Into<PathBuf>) -> Self {
        Self {
            binary_path: binary_path.into(),
        }
    }

    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    /// Base file name of the executable, as it appears in the bundle root
    pub fn binary_name(&self) -> Result<&str> {
        self.binary_path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                DeployError::GenericError(format!(
                    "binary path {} has no UTF-8 file name",
                    self.binary_path.display()
                ))
            })
    }
}

/// Compiles the application described by an [`Environment`].
///
/// Called exactly once per packaging run.
#[allow(async_fn_in_trait)]
pub trait BuildHarness {
    async fn build(&self, env: &Environment) -> std::result::Result<BuildArtifact, BuildError>;

    /// Directory the build writes into, if the harness was pointed at one.
    ///
    /// It must survive clearing the destination, so it may not overlap it.
    fn output_dir(&self) -> Option<&Path> {
        None
    }
}

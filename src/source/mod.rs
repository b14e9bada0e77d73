//! Import path parsing and resolution
//!
//! An import path is the logical, slash-separated identifier of a source tree
//! (`example.com/app`). On disk it resolves to the same segments joined under a
//! source root, and the bundle mirrors that structure under its `src` directory.

use crate::error::{CliError, DeployError, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// Validated logical import path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportPath(String);

impl ImportPath {
    pub fn parse(source: &str) -> Result<Self> {
        let trimmed = source.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(invalid(source, "import path cannot be empty"));
        }
        if trimmed.starts_with('/') {
            return Err(invalid(source, "import path must be relative"));
        }
        if trimmed.contains('\\') {
            return Err(invalid(source, "import path segments are separated by '/'"));
        }

        for segment in trimmed.split('/') {
            match segment {
                "" => return Err(invalid(source, "import path contains an empty segment")),
                "." | ".." => {
                    return Err(invalid(source, "import path cannot contain '.' or '..'"));
                }
                s if s.contains(':') => {
                    return Err(invalid(source, "import path cannot contain ':'"));
                }
                _ => {}
            }
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// Joins every segment under `root`, producing the mirrored directory.
    pub fn mirror_under(&self, root: &Path) -> PathBuf {
        self.segments().fold(root.to_path_buf(), |path, seg| path.join(seg))
    }
}

impl fmt::Display for ImportPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn invalid(source: &str, reason: &str) -> DeployError {
    DeployError::Cli(CliError::InvalidArguments {
        reason: format!("{reason}: '{source}'"),
    })
}

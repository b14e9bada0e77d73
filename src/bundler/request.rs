//! Packaging request: what to package, where, and in which run mode.

use crate::error::{CliError, Result};
use crate::source::ImportPath;
use std::path::{Path, PathBuf};

/// Run mode used when none is given
pub const DEFAULT_RUN_MODE: &str = "dev";

/// Validated input of one packaging run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagingRequest {
    app_import_path: ImportPath,
    destination: PathBuf,
    run_mode: String,
}

impl PackagingRequest {
    /// Validates the inputs. Import path and destination are required,
    /// an empty or absent run mode falls back to [`DEFAULT_RUN_MODE`].
    pub fn new(
        app_import_path: &str,
        destination: impl Into<PathBuf>,
        run_mode: Option<&str>,
    ) -> Result<Self> {
        if app_import_path.trim().is_empty() {
            return Err(CliError::MissingArgument {
                argument: "import path".to_string(),
            }
            .into());
        }
        let destination = destination.into();
        if destination.as_os_str().is_empty() {
            return Err(CliError::MissingArgument {
                argument: "target path".to_string(),
            }
            .into());
        }

        let run_mode = run_mode
            .map(str::trim)
            .filter(|mode| !mode.is_empty())
            .unwrap_or(DEFAULT_RUN_MODE);

        Ok(Self {
            app_import_path: ImportPath::parse(app_import_path)?,
            destination,
            run_mode: run_mode.to_string(),
        })
    }

    pub fn app_import_path(&self) -> &ImportPath {
        &self.app_import_path
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn run_mode(&self) -> &str {
        &self.run_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_mode_defaults_to_dev() {
        let req = PackagingRequest::new("example.com/app", "/tmp/out", None).unwrap();
        assert_eq!(req.run_mode(), "dev");
        assert_eq!(req.destination(), Path::new("/tmp/out"));

        let req = PackagingRequest::new("example.com/app", "/tmp/out", Some("")).unwrap();
        assert_eq!(req.run_mode(), "dev");
    }

    #[test]
    fn required_fields_are_checked() {
        assert!(PackagingRequest::new("", "/tmp/out", None).is_err());
        assert!(PackagingRequest::new("example.com/app", "", None).is_err());
        assert!(PackagingRequest::new("../app", "/tmp/out", None).is_err());
    }
}

//! One-time environment resolution for a packaging run.
//!
//! [`Environment::init`] turns a run mode, the application's import path and
//! the user supplied [`EnvironmentOptions`] into absolute filesystem locations.
//! The [`crate::bundler::Packager`] holds the result and initializes at most once.

use crate::error::{CliError, DeployError, Result};
use crate::source::ImportPath;
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Import path of the runtime support library when none is configured
pub const DEFAULT_RUNTIME_IMPORT_PATH: &str = "kodegen.ai/runtime";

/// User supplied configuration, typically from CLI flags and their env fallbacks
#[derive(Debug, Clone, Default)]
pub struct EnvironmentOptions {
    /// Directory that import paths resolve under (defaults to the current directory)
    pub src_root: Option<PathBuf>,

    /// Import path of the runtime support library
    pub runtime_import_path: Option<String>,

    /// Explicit location of the runtime support library, bypassing import path resolution
    pub runtime_path: Option<PathBuf>,

    /// Directory holding `run.sh.hbs` / `run.bat.hbs` overrides
    pub templates_dir: Option<PathBuf>,

    /// Glob patterns, relative to the application root, left out of the source copy
    pub exclude: Vec<String>,
}

/// Resolved paths for one application and run mode
#[derive(Debug, Clone)]
pub struct Environment {
    run_mode: String,
    app_import_path: ImportPath,
    base_path: PathBuf,
    runtime_import_path: ImportPath,
    runtime_path: PathBuf,
    templates_dir: Option<PathBuf>,
    exclude: Vec<glob::Pattern>,
}

impl Environment {
    pub fn init(
        run_mode: &str,
        app_import_path: &ImportPath,
        options: &EnvironmentOptions,
    ) -> Result<Self> {
        let src_root = match &options.src_root {
            Some(root) => absolute(root)?,
            None => std::env::current_dir()?,
        };

        let base_path = app_import_path.mirror_under(&src_root);
        require_dir(&base_path, "Application")?;

        let runtime_import_path = ImportPath::parse(
            options
                .runtime_import_path
                .as_deref()
                .unwrap_or(DEFAULT_RUNTIME_IMPORT_PATH),
        )?;
        let runtime_path = match &options.runtime_path {
            Some(path) => absolute(path)?,
            None => runtime_import_path.mirror_under(&src_root),
        };
        require_dir(&runtime_path, "Runtime support library")?;

        let templates_dir = options.templates_dir.as_deref().map(absolute).transpose()?;

        let exclude = options
            .exclude
            .iter()
            .map(|pattern| {
                glob::Pattern::new(pattern).map_err(|e| {
                    DeployError::Cli(CliError::InvalidArguments {
                        reason: format!("invalid exclude pattern '{pattern}': {e}"),
                    })
                })
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "Initialized environment: mode={}, app={}, runtime={}",
            run_mode,
            base_path.display(),
            runtime_path.display()
        );

        Ok(Self {
            run_mode: run_mode.to_string(),
            app_import_path: app_import_path.clone(),
            base_path,
            runtime_import_path,
            runtime_path,
            templates_dir,
            exclude,
        })
    }

    pub fn run_mode(&self) -> &str {
        &self.run_mode
    }

    pub fn app_import_path(&self) -> &ImportPath {
        &self.app_import_path
    }

    /// Application source root
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn runtime_import_path(&self) -> &ImportPath {
        &self.runtime_import_path
    }

    /// Runtime support library root (holds `conf/` and `views/`)
    pub fn runtime_path(&self) -> &Path {
        &self.runtime_path
    }

    pub fn templates_dir(&self) -> Option<&Path> {
        self.templates_dir.as_deref()
    }

    pub fn exclude(&self) -> &[glob::Pattern] {
        &self.exclude
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(path.absolutize()?.into_owned())
}

fn require_dir(path: &Path, what: &str) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(DeployError::Cli(CliError::InvalidArguments {
            reason: format!("{what} not found at {}", path.display()),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn src_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("example.com/app")).unwrap();
        std::fs::create_dir_all(dir.path().join("kodegen.ai/runtime")).unwrap();
        dir
    }

    #[test]
    fn resolves_paths_under_src_root() {
        let dir = src_tree();
        let options = EnvironmentOptions {
            src_root: Some(dir.path().to_path_buf()),
            exclude: vec!["target".into()],
            ..Default::default()
        };
        let app = ImportPath::parse("example.com/app").unwrap();
        let env = Environment::init("prod", &app, &options).unwrap();

        assert_eq!(env.run_mode(), "prod");
        assert_eq!(env.base_path(), dir.path().join("example.com").join("app"));
        assert_eq!(
            env.runtime_path(),
            dir.path().join("kodegen.ai").join("runtime")
        );
        assert_eq!(env.runtime_import_path().as_str(), DEFAULT_RUNTIME_IMPORT_PATH);
        assert_eq!(env.exclude().len(), 1);
    }

    #[test]
    fn missing_application_is_rejected() {
        let dir = src_tree();
        let options = EnvironmentOptions {
            src_root: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let app = ImportPath::parse("example.com/missing").unwrap();
        let err = Environment::init("dev", &app, &options).unwrap_err();
        assert!(err.to_string().contains("Application not found"));
    }

    #[test]
    fn bad_exclude_pattern_is_rejected() {
        let dir = src_tree();
        let options = EnvironmentOptions {
            src_root: Some(dir.path().to_path_buf()),
            exclude: vec!["[".into()],
            ..Default::default()
        };
        let app = ImportPath::parse("example.com/app").unwrap();
        assert!(Environment::init("dev", &app, &options).is_err());
    }
}

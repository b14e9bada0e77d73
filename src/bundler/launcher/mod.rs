//! Launcher script generation.
//!
//! Renders one POSIX shell and one Windows batch launcher into the bundle root
//! from a shared [`LauncherTemplateData`] record.
//!
//! # Module Organization
//!
//! - `template` - Embedded launcher templates
//! - `render` - [`TemplateRenderer`] seam and the Handlebars implementation

mod render;
mod template;

pub use render::{HandlebarsRenderer, TemplateRenderer};

use super::utils::fs::set_executable;
use crate::error::LauncherError;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// File name of the POSIX launcher; its presence marks a previous build
pub const POSIX_LAUNCHER: &str = "run.sh";

/// File name of the Windows launcher
pub const BATCH_LAUNCHER: &str = "run.bat";

/// Values substituted into every launcher template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LauncherTemplateData {
    /// Base name of the packaged executable
    pub binary_name: String,
    /// Application import path
    pub import_path: String,
    /// Run mode the application starts in
    pub run_mode: String,
}

/// Launcher flavours written into every bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LauncherKind {
    Posix,
    Batch,
}

impl LauncherKind {
    pub const ALL: [LauncherKind; 2] = [LauncherKind::Posix, LauncherKind::Batch];

    /// File name inside the bundle root
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Posix => POSIX_LAUNCHER,
            Self::Batch => BATCH_LAUNCHER,
        }
    }

    /// File name of the override inside a templates directory
    pub fn template_file_name(self) -> &'static str {
        match self {
            Self::Posix => "run.sh.hbs",
            Self::Batch => "run.bat.hbs",
        }
    }

    fn embedded_template(self) -> &'static str {
        match self {
            Self::Posix => template::RUN_SH_TEMPLATE,
            Self::Batch => template::RUN_BAT_TEMPLATE,
        }
    }

    fn is_executable(self) -> bool {
        matches!(self, Self::Posix)
    }
}

/// Render and write both launchers into `root`.
///
/// Templates come from `templates_dir` when given, where a missing file is an
/// error, otherwise the embedded defaults are used. The POSIX launcher is
/// made executable.
///
/// # Returns
///
/// Paths of the written launchers, POSIX first.
pub async fn generate_launchers<R: TemplateRenderer>(
    root: &Path,
    data: &LauncherTemplateData,
    renderer: &R,
    templates_dir: Option<&Path>,
) -> Result<Vec<PathBuf>, LauncherError> {
    let mut written = Vec::with_capacity(LauncherKind::ALL.len());

    for kind in LauncherKind::ALL {
        let source = load_template(kind, templates_dir).await?;
        let content = renderer.render(kind.file_name(), &source, data)?;

        let path = root.join(kind.file_name());
        tokio::fs::write(&path, content)
            .await
            .map_err(|source| LauncherError::Write {
                path: path.clone(),
                source,
            })?;

        if kind.is_executable() {
            set_executable(&path)
                .await
                .map_err(|source| LauncherError::Write {
                    path: path.clone(),
                    source,
                })?;
        }

        log::debug!("Wrote launcher {}", path.display());
        written.push(path);
    }

    Ok(written)
}

async fn load_template(
    kind: LauncherKind,
    templates_dir: Option<&Path>,
) -> Result<String, LauncherError> {
    let Some(dir) = templates_dir else {
        return Ok(kind.embedded_template().to_string());
    };

    let path = dir.join(kind.template_file_name());
    match tokio::fs::read_to_string(&path).await {
        Ok(source) => Ok(source),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(LauncherError::MissingTemplate { path })
        }
        Err(source) => Err(LauncherError::ReadTemplate { path, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> LauncherTemplateData {
        LauncherTemplateData {
            binary_name: "app-bin".into(),
            import_path: "example.com/app".into(),
            run_mode: "dev".into(),
        }
    }

    /// Renders the data record as fixed text so tests see exactly what was substituted.
    struct EchoRenderer;

    impl TemplateRenderer for EchoRenderer {
        fn render(
            &self,
            name: &str,
            _source: &str,
            data: &LauncherTemplateData,
        ) -> Result<String, LauncherError> {
            Ok(format!(
                "{name}:{}:{}:{}",
                data.binary_name, data.import_path, data.run_mode
            ))
        }
    }

    #[tokio::test]
    async fn writes_both_launchers_to_root() {
        let dir = tempfile::tempdir().unwrap();
        let written = generate_launchers(dir.path(), &data(), &EchoRenderer, None)
            .await
            .unwrap();

        assert_eq!(
            written,
            vec![dir.path().join("run.sh"), dir.path().join("run.bat")]
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("run.bat")).unwrap(),
            "run.bat:app-bin:example.com/app:dev"
        );
    }

    #[tokio::test]
    async fn embedded_templates_render() {
        let dir = tempfile::tempdir().unwrap();
        generate_launchers(dir.path(), &data(), &HandlebarsRenderer::new(), None)
            .await
            .unwrap();

        let sh = std::fs::read_to_string(dir.path().join("run.sh")).unwrap();
        assert!(sh.starts_with("#!/bin/sh\n"));
        assert!(sh.contains("\"$SCRIPTPATH/app-bin\""));
        assert!(sh.contains("--import-path \"example.com/app\""));
        assert!(sh.contains("--run-mode \"dev\""));

        let bat = std::fs::read_to_string(dir.path().join("run.bat")).unwrap();
        assert!(bat.starts_with("@echo off\r\n"));
        assert!(bat.contains("\"%~dp0app-bin\""));
        assert!(!bat.contains("{{"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn only_posix_launcher_is_executable() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        generate_launchers(dir.path(), &data(), &HandlebarsRenderer::new(), None)
            .await
            .unwrap();

        let mode = |name: &str| {
            std::fs::metadata(dir.path().join(name))
                .unwrap()
                .permissions()
                .mode()
                & 0o111
        };
        assert_eq!(mode("run.sh"), 0o111);
        assert_eq!(mode("run.bat"), 0);
    }

    #[tokio::test]
    async fn template_overrides_are_used() {
        let templates = tempfile::tempdir().unwrap();
        std::fs::write(templates.path().join("run.sh.hbs"), "sh {{binary_name}}").unwrap();
        std::fs::write(templates.path().join("run.bat.hbs"), "bat {{run_mode}}").unwrap();

        let dir = tempfile::tempdir().unwrap();
        generate_launchers(
            dir.path(),
            &data(),
            &HandlebarsRenderer::new(),
            Some(templates.path()),
        )
        .await
        .unwrap();

        assert_eq!(
            std::fs::read_to_string(dir.path().join("run.sh")).unwrap(),
            "sh app-bin"
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("run.bat")).unwrap(),
            "bat dev"
        );
    }

    #[tokio::test]
    async fn missing_override_is_fatal() {
        let templates = tempfile::tempdir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let err = generate_launchers(
            dir.path(),
            &data(),
            &HandlebarsRenderer::new(),
            Some(templates.path()),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, LauncherError::MissingTemplate { .. }));
        assert!(!dir.path().join("run.sh").exists());
    }
}

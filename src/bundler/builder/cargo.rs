//! Cargo-backed build harness.
//!
//! Builds the application's binary target and reads the executable location
//! from cargo's JSON messages instead of guessing the target directory layout.

use super::harness::{BuildArtifact, BuildHarness};
use super::tool_detection::locate_cargo;
use crate::environment::Environment;
use crate::error::BuildError;
use crate::metadata::load_manifest;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Stdio;

/// Profile used when neither the CLI nor the manifest picks one
pub const DEFAULT_PROFILE: &str = "release";

/// Builds the application with `cargo build`.
#[derive(Debug, Clone, Default)]
pub struct CargoHarness {
    profile: Option<String>,
    target_dir: Option<PathBuf>,
}

impl CargoHarness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces a cargo profile, taking precedence over `[package.metadata.deploy] profile`.
    pub fn with_profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile;
        self
    }

    /// Builds into `target_dir` instead of cargo's default target directory.
    pub fn with_target_dir(mut self, target_dir: Option<PathBuf>) -> Self {
        self.target_dir = target_dir;
        self
    }
}

/// The subset of a cargo JSON message this harness reads
#[derive(Debug, Deserialize)]
struct CargoMessage {
    reason: String,
    #[serde(default)]
    target: Option<CargoTarget>,
    #[serde(default)]
    executable: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct CargoTarget {
    name: String,
    #[serde(default)]
    kind: Vec<String>,
}

impl BuildHarness for CargoHarness {
    async fn build(&self, env: &Environment) -> Result<BuildArtifact, BuildError> {
        let cargo = locate_cargo().await?;
        let manifest_path = env.base_path().join("Cargo.toml");
        let manifest = load_manifest(&manifest_path)?;

        let profile = self
            .profile
            .clone()
            .or(manifest.deploy_settings.profile)
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string());

        log::info!(
            "Building {} (binary '{}', profile '{}')",
            manifest.metadata.name,
            manifest.binary_name,
            profile
        );

        let mut args = vec![
            "build".to_string(),
            "--manifest-path".to_string(),
            manifest_path.display().to_string(),
            "--bin".to_string(),
            manifest.binary_name.clone(),
            "--profile".to_string(),
            profile,
            "--message-format=json-render-diagnostics".to_string(),
        ];
        if let Some(target_dir) = &self.target_dir {
            args.push("--target-dir".to_string());
            args.push(target_dir.display().to_string());
        }
        let command = format!("{} {}", cargo.display(), args.join(" "));
        log::debug!("Running {}", command);

        let output = tokio::process::Command::new(&cargo)
            .args(&args)
            .current_dir(env.base_path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .await
            .map_err(|source| BuildError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(BuildError::Failed {
                command,
                code: output.status.code(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let binary_path = find_executable(&stdout, &manifest.binary_name).ok_or_else(|| {
            BuildError::ArtifactNotFound {
                binary: manifest.binary_name.clone(),
            }
        })?;

        log::info!("✓ Built {}", binary_path.display());
        Ok(BuildArtifact::new(binary_path))
    }

    fn output_dir(&self) -> Option<&Path> {
        self.target_dir.as_deref()
    }
}

/// Pick the executable of binary target `binary` out of cargo's JSON message stream.
fn find_executable(messages: &str, binary: &str) -> Option<PathBuf> {
    messages
        .lines()
        .filter_map(|line| match serde_json::from_str::<CargoMessage>(line) {
            Ok(message) => Some(message),
            Err(e) => {
                log::debug!("Skipping non-message cargo output ({}): {}", e, line);
                None
            }
        })
        .filter(|message| message.reason == "compiler-artifact")
        .filter(|message| {
            message
                .target
                .as_ref()
                .is_some_and(|t| t.name == binary && t.kind.iter().any(|k| k == "bin"))
        })
        .filter_map(|message| message.executable)
        .last()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESSAGES: &str = r#"{"reason":"compiler-artifact","package_id":"serde 1.0.0","target":{"kind":["lib"],"crate_types":["lib"],"name":"serde","src_path":"/r/serde/src/lib.rs"},"filenames":["/t/release/deps/libserde.rlib"],"executable":null,"fresh":true}
not json at all
{"reason":"compiler-artifact","package_id":"app 0.1.0","target":{"kind":["bin"],"crate_types":["bin"],"name":"app-bin","src_path":"/w/app/src/main.rs"},"filenames":["/t/release/app-bin"],"executable":"/t/release/app-bin","fresh":false}
{"reason":"build-finished","success":true}"#;

    #[test]
    fn finds_binary_executable() {
        assert_eq!(
            find_executable(MESSAGES, "app-bin"),
            Some(PathBuf::from("/t/release/app-bin"))
        );
    }

    #[test]
    fn target_dir_is_the_output_dir() {
        assert_eq!(CargoHarness::new().output_dir(), None);
        let harness = CargoHarness::new().with_target_dir(Some(PathBuf::from("/tmp/target")));
        assert_eq!(harness.output_dir(), Some(Path::new("/tmp/target")));
    }

    #[test]
    fn ignores_other_targets() {
        assert_eq!(find_executable(MESSAGES, "serde"), None);
        assert_eq!(find_executable(MESSAGES, "missing"), None);
    }
}

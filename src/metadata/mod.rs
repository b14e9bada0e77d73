//! Binary discovery and deploy settings from the application's Cargo.toml

use crate::error::BuildError;
use std::path::Path;

type Result<T> = std::result::Result<T, BuildError>;

/// Package metadata extracted from Cargo.toml
#[derive(Debug, Clone)]
pub struct PackageMetadata {
    /// Package name from Cargo.toml
    pub name: String,
}

/// Settings from the `[package.metadata.deploy]` section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeploySettings {
    /// Binary target to package when the crate has several
    pub binary: Option<String>,

    /// Cargo profile used for the deployment build
    pub profile: Option<String>,
}

/// Manifest data the build harness needs
#[derive(Debug, Clone)]
pub struct CargoManifest {
    /// Package metadata ([package] section)
    pub metadata: PackageMetadata,

    /// Binary to build (deploy setting, first [[bin]], or package.name)
    pub binary_name: String,

    /// Deploy settings ([package.metadata.deploy] section)
    pub deploy_settings: DeploySettings,
}

/// Load the manifest from Cargo.toml (single read + parse)
pub fn load_manifest(cargo_toml_path: &Path) -> Result<CargoManifest> {
    let manifest = std::fs::read_to_string(cargo_toml_path)
        .map_err(|e| manifest_error(cargo_toml_path, format!("failed to read: {e}")))?;

    let toml_value: toml::Value = toml::from_str(&manifest)
        .map_err(|e| manifest_error(cargo_toml_path, format!("failed to parse: {e}")))?;

    let package = toml_value
        .get("package")
        .ok_or_else(|| manifest_error(cargo_toml_path, "no [package] section"))?;

    let metadata = PackageMetadata {
        name: package
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| manifest_error(cargo_toml_path, "missing 'name' in [package]"))?
            .to_string(),
    };

    let deploy_settings = parse_deploy_settings(&toml_value);

    let binary_name = deploy_settings
        .binary
        .clone()
        .or_else(|| {
            toml_value
                .get("bin")
                .and_then(|v| v.as_array())
                .and_then(|arr| arr.first())
                .and_then(|first| first.get("name"))
                .and_then(|v| v.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| metadata.name.clone());

    Ok(CargoManifest {
        metadata,
        binary_name,
        deploy_settings,
    })
}

fn parse_deploy_settings(toml_value: &toml::Value) -> DeploySettings {
    let mut settings = DeploySettings::default();

    if let Some(deploy) = toml_value
        .get("package")
        .and_then(|p| p.get("metadata"))
        .and_then(|m| m.get("deploy"))
    {
        settings.binary = deploy
            .get("binary")
            .and_then(|v| v.as_str())
            .map(String::from);

        settings.profile = deploy
            .get("profile")
            .and_then(|v| v.as_str())
            .map(String::from);
    }

    settings
}

fn manifest_error(path: &Path, reason: impl Into<String>) -> BuildError {
    BuildError::Manifest {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

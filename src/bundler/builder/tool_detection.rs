//! Build tool detection and availability checking.

use crate::error::BuildError;
use std::path::PathBuf;
use std::process::Stdio;

/// Locate a working `cargo`.
///
/// Honours the `CARGO` environment variable (set when running under cargo
/// itself), then falls back to a `PATH` lookup. The candidate must answer
/// `--version` successfully.
pub async fn locate_cargo() -> Result<PathBuf, BuildError> {
    let path = match std::env::var_os("CARGO") {
        Some(cargo) => PathBuf::from(cargo),
        None => which::which("cargo").map_err(|e| {
            log::debug!("cargo not found in PATH: {}", e);
            BuildError::ToolNotFound {
                tool: "cargo".to_string(),
                reason: format!("not found in PATH: {e}"),
            }
        })?,
    };
    log::debug!("Found cargo at: {}", path.display());

    let version = tokio::process::Command::new(&path)
        .arg("--version")
        .stdin(Stdio::null())
        .output()
        .await;
    match version {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            log::info!("✓ cargo available: {}", version.trim());
            Ok(path)
        }
        Ok(output) => {
            log::warn!(
                "cargo found at {} but --version check failed (exit code: {:?}). \
                     Stderr: {}",
                path.display(),
                output.status.code(),
                String::from_utf8_lossy(&output.stderr)
            );
            Err(BuildError::ToolNotFound {
                tool: "cargo".to_string(),
                reason: format!("{} --version failed", path.display()),
            })
        }
        Err(e) => {
            log::warn!(
                "cargo found at {} but failed to execute: {}. \
                     Check file permissions.",
                path.display(),
                e
            );
            Err(BuildError::ToolNotFound {
                tool: "cargo".to_string(),
                reason: e.to_string(),
            })
        }
    }
}

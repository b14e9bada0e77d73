//! Bundle assembly: staging the binary and source trees into the destination.
//!
//! Steps run in a fixed order and stop at the first failure. Nothing is rolled
//! back; a half-written destination is cleared by the next run only if its
//! launcher marker was already written.

use super::builder::BuildArtifact;
use super::layout::BundleLayout;
use super::utils::fs;
use crate::environment::Environment;
use crate::error::{ErrorExt, Result};
use std::path::Path;

/// Delete the destination (if present) and recreate it empty.
///
/// Destructive. Callers must have checked [`super::guard::is_safe_to_replace`].
pub async fn prepare_destination(root: &Path) -> Result<()> {
    log::info!("Clearing {}", root.display());
    fs::create_dir_all(root, true).await
}

/// Copy the binary, the runtime support trees and the application source into
/// their places under the destination.
pub async fn assemble(
    layout: &BundleLayout,
    env: &Environment,
    artifact: &BuildArtifact,
) -> Result<()> {
    // Binary at the bundle root, executable
    fs::copy_file(artifact.binary_path(), layout.binary()).await?;
    fs::set_executable(layout.binary())
        .await
        .fs_context("setting permissions on", layout.binary())?;
    log::info!("Copied binary to {}", layout.binary().display());

    // Runtime support library, mirrored under src/
    let runtime = env.runtime_path();
    fs::copy_dir(&runtime.join("conf"), &layout.runtime_conf(), &[]).await?;
    fs::copy_dir(&runtime.join("views"), &layout.runtime_views(), &[]).await?;
    log::info!(
        "Copied runtime support files to {}",
        layout.runtime_dir().display()
    );

    // Application source, mirrored under src/
    fs::copy_dir(env.base_path(), layout.app_dir(), env.exclude()).await?;
    log::info!("Copied application source to {}", layout.app_dir().display());

    Ok(())
}

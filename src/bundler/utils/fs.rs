//! File system utilities for bundling.
//!
//! Provides file operations with automatic directory creation,
//! symlink preservation, and path-aware error reporting.

use crate::{
    bail,
    error::{DeployError, ErrorExt, Result},
};
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::fs;

/// Creates all of the directories of the specified path, erasing it first if specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path).await?;
    }

    // create_dir_all is already idempotent - succeeds even if dir exists
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Makes a symbolic link to a directory.
#[cfg(unix)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a directory.
#[cfg(windows)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(unix)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(windows)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(src, dst)
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        bail!("{} does not exist", from.display());
    }
    if !from.is_file() {
        bail!("{} is not a file", from.display());
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying file to", to)?;
    Ok(())
}

/// Sets owner/group/world read and execute bits (0755) on unix.
///
/// No-op elsewhere, there is no executable bit to set.
pub async fn set_executable(path: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).await?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}

/// Recursively copies a directory from one path to another, creating any
/// parent directories of the destination path as necessary.
///
/// Entries whose path relative to `from` matches one of `exclude` are skipped,
/// together with everything below them, and so is any directory holding `to`.
/// Preserves symlinks on platforms that support them. Fails if the source path is not a directory or doesn't exist.
pub async fn copy_dir(from: &Path, to: &Path, exclude: &[glob::Pattern]) -> Result<()> {
    if !from.exists() {
        bail!("{} does not exist", from.display());
    }
    if !from.is_dir() {
        bail!("{} is not a directory", from.display());
    }

    let from = from.to_path_buf();
    let to = to.to_path_buf();
    let exclude = exclude.to_vec();

    // Offload blocking work to dedicated thread pool
    tokio::task::spawn_blocking(move || copy_dir_blocking(&from, &to, &exclude))
        .await
        .map_err(|e| DeployError::GenericError(format!("Directory copy task panicked: {e}")))?
}

fn copy_dir_blocking(from: &Path, to: &Path, exclude: &[glob::Pattern]) -> Result<()> {
    std::fs::create_dir_all(to).fs_context("creating directory", to)?;
    let real_to = std::fs::canonicalize(to).fs_context("resolving", to)?;

    let walker = walkdir::WalkDir::new(from)
        .into_iter()
        .filter_entry(|entry| {
            if is_excluded(from, entry.path(), exclude) {
                return false;
            }
            // Never descend into the copy itself
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !contains(entry.path(), &real_to)
        });

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| from.to_path_buf());
            DeployError::Fs {
                action: "reading directory entry",
                path,
                source: e.into(),
            }
        })?;
        let rel_path = entry.path().strip_prefix(from).map_err(|e| {
            DeployError::GenericError(format!("{}: {e}", entry.path().display()))
        })?;
        let dest_path: PathBuf = to.join(rel_path);

        if entry.file_type().is_symlink() {
            let target = std::fs::read_link(entry.path()).fs_context("reading link", entry.path())?;
            if entry.path().is_dir() {
                symlink_dir(&target, &dest_path).fs_context("creating symlink", &dest_path)?;
            } else {
                symlink_file(&target, &dest_path).fs_context("creating symlink", &dest_path)?;
            }
        } else if entry.file_type().is_dir() {
            std::fs::create_dir_all(&dest_path).fs_context("creating directory", &dest_path)?;
        } else {
            std::fs::copy(entry.path(), &dest_path).fs_context("copying file to", &dest_path)?;
        }
    }

    Ok(())
}

/// Whether directory `dir` is `target` or one of its ancestors, symlinks resolved
fn contains(dir: &Path, target: &Path) -> bool {
    std::fs::canonicalize(dir).is_ok_and(|real| target.starts_with(real))
}

fn is_excluded(root: &Path, path: &Path, exclude: &[glob::Pattern]) -> bool {
    match path.strip_prefix(root) {
        // The root itself is never excluded
        Ok(rel) if rel.as_os_str().is_empty() => false,
        Ok(rel) => exclude.iter().any(|pattern| pattern.matches_path(rel)),
        Err(_) => false,
    }
}

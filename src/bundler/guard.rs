//! Destination safety check.
//!
//! The destination directory is deleted and recreated on every run, so it must
//! be absent, empty, or recognizably the output of an earlier run. The POSIX
//! launcher written at the bundle root doubles as that recognition marker.

use super::launcher::POSIX_LAUNCHER;
use std::{io, path::Path};

/// Returns whether `path` may be removed and recreated.
///
/// Read-only probe. True when the path does not exist, is an empty directory,
/// or is a directory holding the launcher marker file at its root. Regular
/// files, symlinks and unreadable paths are never safe.
pub fn is_safe_to_replace(path: &Path) -> bool {
    let metadata = match std::fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return true,
        Err(e) => {
            log::warn!("Cannot inspect {}: {}", path.display(), e);
            return false;
        }
    };

    if !metadata.is_dir() {
        log::debug!("{} exists and is not a directory", path.display());
        return false;
    }

    is_empty_dir(path) || path.join(POSIX_LAUNCHER).is_file()
}

fn is_empty_dir(path: &Path) -> bool {
    match std::fs::read_dir(path) {
        Ok(mut entries) => entries.next().is_none(),
        Err(e) => {
            log::warn!("Cannot list {}: {}", path.display(), e);
            false
        }
    }
}

//! Error types for packaging operations.
//!
//! Every fatal condition of the pipeline maps to one variant of [`DeployError`];
//! the binary prints it and exits non-zero.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for packaging operations
pub type Result<T> = std::result::Result<T, DeployError>;

/// Main error type for all packaging operations
#[derive(Error, Debug)]
pub enum DeployError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// Destination exists, is not empty and carries no launcher marker
    #[error(
        "Abort: {} exists and does not look like a build directory.",
        path.display()
    )]
    UnsafeDestination {
        /// Offending destination path
        path: PathBuf,
    },

    /// Destination contains, or is contained by, a tree that gets copied into it
    #[error(
        "Abort: destination {} overlaps source tree {}",
        destination.display(),
        source_tree.display()
    )]
    DestinationOverlapsSource {
        /// Destination path
        destination: PathBuf,
        /// Source tree it overlaps
        source_tree: PathBuf,
    },

    /// Compiling the application failed
    #[error("Failed to build: {0}")]
    Build(#[from] BuildError),

    /// A file system step of bundle assembly failed
    #[error("Failed {action} {}: {source}", path.display())]
    Fs {
        /// What was being done
        action: &'static str,
        /// Path the operation failed on
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Launcher script generation failed
    #[error("Launcher error: {0}")]
    Launcher(#[from] LauncherError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else
    #[error("{0}")]
    GenericError(String),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },
}

/// Errors raised by a [`crate::bundler::BuildHarness`]
#[derive(Error, Debug)]
pub enum BuildError {
    /// Build tool is not installed or not runnable
    #[error("{tool} not available: {reason}")]
    ToolNotFound {
        /// Tool name
        tool: String,
        /// Why it could not be used
        reason: String,
    },

    /// Application manifest could not be read or is incomplete
    #[error("invalid manifest {}: {reason}", path.display())]
    Manifest {
        /// Manifest path
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },

    /// Build process could not be started
    #[error("failed to run {command}: {source}")]
    Spawn {
        /// Command line that was attempted
        command: String,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Build process exited unsuccessfully
    #[error("{command} exited with status {}", code.map_or_else(|| "unknown".to_string(), |c| c.to_string()))]
    Failed {
        /// Command line that was run
        command: String,
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
    },

    /// Build finished but did not report the expected executable
    #[error("build did not produce an executable for binary '{binary}'")]
    ArtifactNotFound {
        /// Binary target name
        binary: String,
    },
}

/// Errors raised while rendering launcher scripts
#[derive(Error, Debug)]
pub enum LauncherError {
    /// Template override file is missing
    #[error("template {} not found", path.display())]
    MissingTemplate {
        /// Expected template location
        path: PathBuf,
    },

    /// Template source could not be read
    #[error("failed to read template {}: {source}", path.display())]
    ReadTemplate {
        /// Template location
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Template source is not valid
    #[error("failed to register template {name}: {reason}")]
    Register {
        /// Template name
        name: String,
        /// Parser message
        reason: String,
    },

    /// Substitution failed
    #[error("failed to render template {name}: {reason}")]
    Render {
        /// Template name
        name: String,
        /// Renderer message
        reason: String,
    },

    /// Writing or chmod of the rendered script failed
    #[error("failed writing {}: {source}", path.display())]
    Write {
        /// Launcher path
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },
}

/// Attach path context to IO results.
pub trait ErrorExt<T> {
    /// Converts an IO error into [`DeployError::Fs`] naming the action and path.
    fn fs_context(self, action: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, action: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| DeployError::Fs {
            action,
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}

/// Returns early with a [`DeployError::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::error::DeployError::GenericError(format!($($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsafe_destination_names_path() {
        let err = DeployError::UnsafeDestination {
            path: PathBuf::from("/tmp/out"),
        };
        assert_eq!(
            err.to_string(),
            "Abort: /tmp/out exists and does not look like a build directory."
        );
    }

    #[test]
    fn fs_context_keeps_path() {
        let res: std::io::Result<()> = Err(std::io::Error::other("boom"));
        let err = res.fs_context("copying binary", "/tmp/out/app").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("copying binary"));
        assert!(msg.contains("/tmp/out/app"));
    }
}

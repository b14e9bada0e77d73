//! Deployment bundle packager library
//!
//! Builds an application and stages it into a self-contained directory that
//! runs without the build toolchain:
//! - the compiled binary at the bundle root
//! - runtime support files and application source mirrored under `src/`
//! - `run.sh` and `run.bat` launchers
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod environment;
pub mod error;
pub mod metadata;
pub mod source;

// Re-export commonly used types
pub use error::{BuildError, CliError, DeployError, LauncherError, Result};

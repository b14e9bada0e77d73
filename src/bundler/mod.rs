//! Deployment bundle packaging.
//!
//! Turns an application import path, a destination and a run mode into a
//! self-contained directory: the compiled binary, the runtime support files and
//! application source mirrored under `src/`, and `run.sh` / `run.bat` launchers.
//!
//! # Example
//!
//! ```no_run
//! use kodegen_bundler_deploy::bundler::{Packager, PackagingRequest};
//! use kodegen_bundler_deploy::environment::EnvironmentOptions;
//!
//! # async fn example() -> kodegen_bundler_deploy::Result<()> {
//! let request = PackagingRequest::new("example.com/chat", "/tmp/chat", Some("prod"))?;
//! Packager::new(EnvironmentOptions::default())
//!     .package(&request)
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`guard`] - Destination safety check
//! - `builder` - Build harness and the [`Packager`] orchestrator
//! - [`assemble`] - Copying binary and source trees
//! - [`launcher`] - Launcher script rendering
//! - `layout` - Destination paths
//! - `request` - Validated packaging input

pub mod assemble;
mod builder;
pub mod guard;
pub mod launcher;
mod layout;
mod request;
pub(crate) mod utils;

pub use builder::{BuildArtifact, BuildHarness, CargoHarness, Packager};
pub use layout::{BundleLayout, SRC_DIR};
pub use request::{DEFAULT_RUN_MODE, PackagingRequest};

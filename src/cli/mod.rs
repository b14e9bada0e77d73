//! Command line interface for the deployment packager.
//!
//! This module parses arguments and dispatches to the subcommand
//! implementations.

mod args;
pub mod commands;

pub use args::{Args, BuildArgs, Command};

use crate::error::Result;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    match &args.command {
        Command::Build(build) => commands::build::execute(build).await,
    }
}

//! Command line argument parsing.
//!
//! This module provides CLI argument parsing using clap. Every option of the
//! `build` subcommand can also be supplied through an environment variable.

use super::commands::build::{BUILD_LONG, BUILD_USAGE};
use crate::environment::EnvironmentOptions;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Deployment bundle packager
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_bundler_deploy",
    version,
    about = "Packages an application into a self-contained deployment directory"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build an application for deployment
    #[command(override_usage = BUILD_USAGE, long_about = BUILD_LONG)]
    Build(BuildArgs),
}

/// Arguments of the `build` subcommand.
///
/// Positionals are optional so that an incomplete invocation prints the usage
/// text instead of failing argument parsing.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Import path of the application (e.g. example.com/chat)
    #[arg(value_name = "IMPORT_PATH")]
    pub import_path: Option<String>,

    /// Target directory; deleted and recreated when it holds a previous build
    #[arg(value_name = "TARGET_PATH")]
    pub target_path: Option<PathBuf>,

    /// Run mode the launchers start the application in (defaults to "dev")
    #[arg(value_name = "RUN_MODE")]
    pub run_mode: Option<String>,

    /// Directory that import paths resolve under
    #[arg(long, env = "KODEGEN_SRC_ROOT", value_name = "DIR")]
    pub src_root: Option<PathBuf>,

    /// Import path of the runtime support library
    #[arg(long, env = "KODEGEN_RUNTIME_IMPORT_PATH", value_name = "IMPORT_PATH")]
    pub runtime_import_path: Option<String>,

    /// Location of the runtime support library, overriding import path resolution
    #[arg(long, env = "KODEGEN_RUNTIME_PATH", value_name = "DIR")]
    pub runtime_path: Option<PathBuf>,

    /// Directory with run.sh.hbs / run.bat.hbs launcher template overrides
    #[arg(long, env = "KODEGEN_TEMPLATES_DIR", value_name = "DIR")]
    pub templates_dir: Option<PathBuf>,

    /// Cargo profile for the build (defaults to the manifest setting, then "release")
    #[arg(long, env = "KODEGEN_BUILD_PROFILE", value_name = "PROFILE")]
    pub profile: Option<String>,

    /// Cargo target directory for the build
    #[arg(long, env = "KODEGEN_TARGET_DIR", value_name = "DIR")]
    pub target_dir: Option<PathBuf>,

    /// Glob, relative to the application root, to leave out of the source copy (repeatable)
    #[arg(long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl From<&BuildArgs> for EnvironmentOptions {
    fn from(args: &BuildArgs) -> Self {
        Self {
            src_root: args.src_root.clone(),
            runtime_import_path: args.runtime_import_path.clone(),
            runtime_path: args.runtime_path.clone(),
            templates_dir: args.templates_dir.clone(),
            exclude: args.exclude.clone(),
        }
    }
}

//! Subcommand implementations.

pub mod build;

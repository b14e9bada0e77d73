//! Build invocation and pipeline orchestration.
//!
//! This module provides the [`Packager`] orchestrator that turns a
//! [`crate::bundler::PackagingRequest`] into a runnable bundle.
//!
//! # Overview
//!
//! The packager:
//! 1. Resolves the [`crate::environment::Environment`] once
//! 2. Checks the destination may be replaced
//! 3. Clears the destination
//! 4. Builds the application through a [`BuildHarness`]
//! 5. Assembles binary and source trees
//! 6. Generates launcher scripts
//!
//! # Module Organization
//!
//! - `harness` - [`BuildHarness`] seam and [`BuildArtifact`]
//! - `cargo` - Cargo-backed harness
//! - `orchestrator` - Main [`Packager`] struct
//! - `tool_detection` - Cargo availability checking

mod cargo;
mod harness;
mod orchestrator;
mod tool_detection;

pub use cargo::CargoHarness;
pub use harness::{BuildArtifact, BuildHarness};
pub use orchestrator::Packager;

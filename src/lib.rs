//! ska-builder - Build-order driven conda package builds
//!
//! This library clones and updates the sources of Ska packages and runs
//! `conda build` for them, in the order given by a build order file.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Build order, update detection and orchestration
//! - [`infra`] - Infrastructure layer (git, build tool, filesystem)
//! - [`config`] - Configuration constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

pub use crate::core::builder::{BuildOrchestrator, BuildReport, CloneReport};
pub use crate::error::SkaError;

#[cfg(test)]
pub mod test_utils;

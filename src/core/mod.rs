//! Core business logic module
//!
//! Sequencing policy for source synchronization and package builds.
//! Side effects go through the traits in [`crate::infra`].
//!
//! # Submodules
//!
//! - [`build_order`] - Build order file parsing
//! - [`descriptor`] - Package descriptor (`meta.yaml`) reading
//! - [`layout`] - Work root and recipes directory paths
//! - [`settings`] - Settings file handling
//! - [`sync`] - Clone-if-missing for working copies
//! - [`update`] - Latest-tag update detection
//! - [`builder`] - Build orchestration
//! - [`doctor`] - Environment checks

pub mod build_order;
pub mod builder;
pub mod descriptor;
pub mod doctor;
pub mod layout;
pub mod settings;
pub mod sync;
pub mod update;

//! Error types for ska-builder
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

use crate::core::builder::BuildReport;
pub use crate::infra::git::GitError;

/// Package descriptor (`meta.yaml`) errors
#[derive(Error, Debug)]
pub enum DescriptorError {
    /// Descriptor file does not exist or cannot be read
    #[error("Descriptor for package '{package}' not found at '{path}': {error}")]
    NotFound {
        package: String,
        path: PathBuf,
        error: String,
    },

    /// Descriptor is not valid YAML
    #[error("Failed to parse descriptor for package '{package}': {error}")]
    Parse { package: String, error: String },

    /// Descriptor has no `about.home` entry
    #[error("Descriptor for package '{package}' has no about.home source URL")]
    MissingHome { package: String },
}

/// Build order file errors
#[derive(Error, Debug)]
pub enum BuildOrderError {
    /// Failed to read the build order file
    #[error("Failed to read build order '{path}': {error}")]
    ReadError { path: PathBuf, error: String },
}

/// Build tool errors
#[derive(Error, Debug)]
pub enum BuildError {
    /// The build tool could not be started
    #[error("Failed to run '{command}' for package '{package}': {error}")]
    Spawn {
        package: String,
        command: String,
        error: String,
    },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },
}

/// Top-level ska-builder error type
#[derive(Error, Debug)]
pub enum SkaError {
    /// Descriptor error
    #[error("Descriptor error: {0}")]
    Descriptor(#[from] DescriptorError),

    /// Build order error
    #[error("Build order error: {0}")]
    BuildOrder(#[from] BuildOrderError),

    /// Git error
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    /// Build tool error
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),

    /// A build exited unsuccessfully and the failure policy is `abort`
    ///
    /// `report` holds what the run did up to and including the failed build.
    #[error("Build of package '{package}' failed ({})", exit_description(*code))]
    BuildFailed {
        package: String,
        code: Option<i32>,
        report: Box<BuildReport>,
    },
}

fn exit_description(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

//! Builder settings
//!
//! Reads settings from a TOML file (default `config.toml` in the config
//! directory). A missing file yields defaults; command-line values override
//! whatever the file says.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::defaults::{BUILD_COMMAND, DEFAULT_ROOT, SELF_PACKAGE};
use crate::core::layout::Layout;
use crate::infra::dirs::SkaDirs;

/// Settings error types
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to read settings file
    #[error("Failed to read config file '{path}': {error}")]
    ReadError { path: String, error: String },

    /// Failed to parse settings file
    #[error("Failed to parse config file '{path}': {error}")]
    ParseError { path: String, error: String },
}

/// What to do when a build exits unsuccessfully
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Record the failure and keep going
    #[default]
    Continue,
    /// Stop the remaining sequence
    Abort,
}

/// All settings for a builder run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuilderSettings {
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,

    /// Build tool settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Package naming settings
    #[serde(default)]
    pub packages: PackagesConfig,
}

/// Path settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Work root for clones and build output
    pub root: Option<PathBuf>,

    /// Directory containing `pkg_defs/` and `build_order.txt`
    pub recipes: Option<PathBuf>,
}

/// Build tool settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Build tool executable
    pub command: Option<String>,

    /// Extra arguments appended to every build invocation
    #[serde(default)]
    pub extra_args: Vec<String>,

    /// Failure policy
    #[serde(default)]
    pub on_failure: FailurePolicy,
}

/// Package naming settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackagesConfig {
    /// Name of the package that denotes the Ska environment itself
    pub self_name: Option<String>,
}

impl BuilderSettings {
    /// Load settings from the config directory
    pub fn load(dirs: &SkaDirs) -> Result<Self, SettingsError> {
        Self::load_from_path(&dirs.config_path())
    }

    /// Load settings from a specific path
    ///
    /// Returns defaults if the file does not exist.
    pub fn load_from_path(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| SettingsError::ReadError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| SettingsError::ParseError {
            path: path.display().to_string(),
            error: e.to_string(),
        })
    }

    /// Override the work root
    #[must_use]
    pub fn with_root(mut self, root: Option<PathBuf>) -> Self {
        if root.is_some() {
            self.paths.root = root;
        }
        self
    }

    /// Override the recipes directory
    #[must_use]
    pub fn with_recipes(mut self, recipes: Option<PathBuf>) -> Self {
        if recipes.is_some() {
            self.paths.recipes = recipes;
        }
        self
    }

    /// Effective directory layout
    pub fn layout(&self) -> Layout {
        Layout::new(
            self.paths
                .root
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT)),
            self.paths
                .recipes
                .clone()
                .unwrap_or_else(|| PathBuf::from(".")),
        )
    }

    /// Effective build tool executable
    #[must_use]
    pub fn build_command(&self) -> &str {
        self.build.command.as_deref().unwrap_or(BUILD_COMMAND)
    }

    /// Effective self-package name
    #[must_use]
    pub fn self_name(&self) -> &str {
        self.packages.self_name.as_deref().unwrap_or(SELF_PACKAGE)
    }
}

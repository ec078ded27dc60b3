//! Platform-specific directory management
//!
//! Provides the configuration directory, following the XDG Base Directory
//! Specification on Linux and standard locations on macOS.
//!
//! `SKA_BUILDER_CONFIG_DIR` overrides the default location.

use std::env;
use std::path::PathBuf;

/// Environment variable name for the config directory override
pub const ENV_CONFIG_DIR: &str = "SKA_BUILDER_CONFIG_DIR";

/// Application name used in directory paths
const APP_NAME: &str = "ska-builder";

/// Config file name inside the config directory
const CONFIG_FILE: &str = "config.toml";

/// Platform-specific directory provider for ska-builder
#[derive(Debug, Clone)]
pub struct SkaDirs {
    config_dir: PathBuf,
}

impl SkaDirs {
    /// Create a new `SkaDirs` instance
    ///
    /// Checks the environment variable first, then falls back to platform defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve_config_dir(),
        }
    }

    /// Create a `SkaDirs` rooted at an explicit config directory
    #[must_use]
    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Get the config directory path
    ///
    /// - Linux: `$XDG_CONFIG_HOME/ska-builder` or `~/.config/ska-builder`
    /// - macOS: `~/Library/Application Support/ska-builder`
    #[must_use]
    pub fn config_dir(&self) -> PathBuf {
        self.config_dir.clone()
    }

    /// Get the settings file path
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    /// Resolve config directory from environment or platform default
    fn resolve_config_dir() -> PathBuf {
        if let Ok(path) = env::var(ENV_CONFIG_DIR) {
            return PathBuf::from(path);
        }

        Self::platform_config_dir()
    }

    /// Get platform-specific config directory
    fn platform_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .unwrap_or_else(|| {
                // Fallback to home directory
                dirs::home_dir()
                    .map(|h| h.join(".config").join(APP_NAME))
                    .unwrap_or_else(|| PathBuf::from(".").join(".config").join(APP_NAME))
            })
    }
}

impl Default for SkaDirs {
    fn default() -> Self {
        Self::new()
    }
}

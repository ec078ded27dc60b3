//! Filesystem layout
//!
//! Resolves every path the builder touches from two roots: the work root
//! (clones and build output) and the recipes directory (package definitions
//! and the build order file). The layout is passed explicitly to every
//! component that needs a path.

use std::path::{Path, PathBuf};

use crate::config::defaults::{
    BUILDS_SUBDIR, BUILD_ORDER_FILE, DEFAULT_ROOT, PKG_DEFS_DIR, SRC_SUBDIR,
};

/// Resolved directory layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
    recipes: PathBuf,
}

impl Layout {
    /// Create a layout from a work root and a recipes directory
    pub fn new(root: impl Into<PathBuf>, recipes: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            recipes: recipes.into(),
        }
    }

    /// Work root (`R`)
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Recipes directory containing `pkg_defs/` and the build order
    pub fn recipes(&self) -> &Path {
        &self.recipes
    }

    /// `R/builds`, the build tool's output root
    pub fn build_dir(&self) -> PathBuf {
        self.root.join(BUILDS_SUBDIR)
    }

    /// `R/src`, parent of all working copies
    pub fn src_dir(&self) -> PathBuf {
        self.root.join(SRC_SUBDIR)
    }

    /// `R/src/<name>`, working copy of one package
    pub fn working_copy(&self, name: &str) -> PathBuf {
        self.src_dir().join(name)
    }

    /// Directory with all package definitions
    pub fn pkg_defs(&self) -> PathBuf {
        self.recipes.join(PKG_DEFS_DIR)
    }

    /// Definition directory of one package
    pub fn package_def(&self, name: &str) -> PathBuf {
        self.pkg_defs().join(name)
    }

    /// Build order file
    pub fn build_order_file(&self) -> PathBuf {
        self.recipes.join(BUILD_ORDER_FILE)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT, ".")
    }
}

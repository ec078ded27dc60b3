//! Build order parsing
//!
//! The build order is a plain text file with one package name per line.
//! Lines are trimmed; blank lines and lines starting with `#` are skipped.
//! Each remaining line becomes a [`BuildOrderEntry`], classified once here
//! as either the Ska environment itself or an external package.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::config::defaults::COMMENT_MARKER;
use crate::error::BuildOrderError;

/// A single package in the build order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum BuildOrderEntry {
    /// The Ska environment package; it has no source repository
    SelfPackage(String),
    /// A package whose source is cloned from its descriptor's home URL
    External(String),
}

impl BuildOrderEntry {
    /// Classify a package name against the self-package name
    pub fn classify(name: &str, self_name: &str) -> Self {
        if name == self_name {
            Self::SelfPackage(name.to_string())
        } else {
            Self::External(name.to_string())
        }
    }

    /// Package name
    pub fn name(&self) -> &str {
        match self {
            Self::SelfPackage(name) | Self::External(name) => name,
        }
    }

    /// Whether this entry is the Ska environment itself
    pub fn is_self(&self) -> bool {
        matches!(self, Self::SelfPackage(_))
    }
}

impl fmt::Display for BuildOrderEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered list of packages to process
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildOrder {
    entries: Vec<BuildOrderEntry>,
}

impl BuildOrder {
    /// Parse build order text
    pub fn parse(content: &str, self_name: &str) -> Self {
        let entries = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_MARKER))
            .map(|name| BuildOrderEntry::classify(name, self_name))
            .collect();
        Self { entries }
    }

    /// Read and parse a build order file
    pub fn load(path: &Path, self_name: &str) -> Result<Self, BuildOrderError> {
        let content = std::fs::read_to_string(path).map_err(|e| BuildOrderError::ReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        let order = Self::parse(&content, self_name);
        tracing::debug!(
            "Loaded build order from {} ({} packages)",
            path.display(),
            order.len()
        );
        Ok(order)
    }

    /// Entries in build order
    pub fn entries(&self) -> &[BuildOrderEntry] {
        &self.entries
    }

    /// Iterate entries in build order
    pub fn iter(&self) -> std::slice::Iter<'_, BuildOrderEntry> {
        self.entries.iter()
    }

    /// Number of packages
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the build order lists no packages
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a BuildOrder {
    type Item = &'a BuildOrderEntry;
    type IntoIter = std::slice::Iter<'a, BuildOrderEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

//! Package descriptor reading
//!
//! Each package definition directory holds a conda `meta.yaml`. The part of
//! interest is `about.home`, the URL of the package's source repository.
//!
//! Conda recipes start with a Jinja header (`{% set ... %}`) and the
//! `source` section refers to the checkout via a templated `path:` line, so
//! the file as a whole is usually not valid YAML. The YAML document is taken
//! to start after the first line whose trimmed text begins with `path:`.
//! Files without such a line are parsed whole.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::defaults::DESCRIPTOR_FILE;
use crate::error::DescriptorError;

/// `about` section of a descriptor
#[derive(Debug, Clone, Default, Deserialize)]
pub struct About {
    /// Source repository URL
    pub home: Option<String>,
    /// License identifier
    pub license: Option<String>,
    /// One-line summary
    pub summary: Option<String>,
}

/// `package` section of a descriptor
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageSection {
    /// Package name
    pub name: Option<String>,
    /// Package version (may be templated)
    pub version: Option<serde_yaml::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct RawDescriptor {
    #[serde(default)]
    package: Option<PackageSection>,
    #[serde(default)]
    about: Option<About>,
}

/// Parsed package descriptor
#[derive(Debug, Clone)]
pub struct PackageDescriptor {
    name: String,
    home: String,
    about: About,
    package: Option<PackageSection>,
}

impl PackageDescriptor {
    /// Path of the descriptor for `name` under `pkg_defs`
    pub fn path_for(pkg_defs: &Path, name: &str) -> PathBuf {
        pkg_defs.join(name).join(DESCRIPTOR_FILE)
    }

    /// Locate and parse the descriptor for `name`
    pub fn load(pkg_defs: &Path, name: &str) -> Result<Self, DescriptorError> {
        let path = Self::path_for(pkg_defs, name);
        let content =
            std::fs::read_to_string(&path).map_err(|e| DescriptorError::NotFound {
                package: name.to_string(),
                path: path.clone(),
                error: e.to_string(),
            })?;
        tracing::debug!("Reading descriptor {}", path.display());
        Self::parse(name, &content)
    }

    /// Parse descriptor text for package `name`
    pub fn parse(name: &str, content: &str) -> Result<Self, DescriptorError> {
        let document = yaml_body(content);
        let raw: RawDescriptor = if document.trim().is_empty() {
            RawDescriptor::default()
        } else {
            serde_yaml::from_str(document).map_err(|e| DescriptorError::Parse {
                package: name.to_string(),
                error: e.to_string(),
            })?
        };

        let about = raw.about.unwrap_or_default();
        let home = about
            .home
            .clone()
            .map(|home| home.trim().to_string())
            .filter(|home| !home.is_empty())
            .ok_or_else(|| DescriptorError::MissingHome {
                package: name.to_string(),
            })?;

        Ok(Self {
            name: name.to_string(),
            home,
            about,
            package: raw.package,
        })
    }

    /// Package name the descriptor was loaded for
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source repository URL
    pub fn home(&self) -> &str {
        &self.home
    }

    /// Full `about` section
    pub fn about(&self) -> &About {
        &self.about
    }

    /// `package` section, when the YAML body includes it
    pub fn package(&self) -> Option<&PackageSection> {
        self.package.as_ref()
    }
}

/// Slice of `content` holding the YAML document
fn yaml_body(content: &str) -> &str {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        offset += line.len();
        if line.trim().starts_with("path:") {
            return &content[offset..];
        }
    }
    content
}

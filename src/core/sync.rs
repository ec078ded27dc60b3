//! Source synchronization
//!
//! Makes sure a package has a working copy under `R/src/<name>`, cloning it
//! from the descriptor's `about.home` URL on first use. An existing directory
//! is reused as-is; its remote is never compared with the descriptor.

use std::path::{Path, PathBuf};

use crate::core::build_order::BuildOrderEntry;
use crate::core::descriptor::PackageDescriptor;
use crate::core::layout::Layout;
use crate::error::SkaError;
use crate::infra::filesystem;
use crate::infra::git::SourceControl;

/// State of a package's working copy after synchronization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncState {
    /// The Ska environment package has no working copy
    NoWorkingCopy,
    /// The working copy was already present
    Existing(PathBuf),
    /// The working copy was cloned just now
    Cloned(PathBuf),
}

impl SyncState {
    /// Path of the working copy, if there is one
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NoWorkingCopy => None,
            Self::Existing(path) | Self::Cloned(path) => Some(path),
        }
    }

    /// Whether this synchronization performed a clone
    pub fn is_fresh(&self) -> bool {
        matches!(self, Self::Cloned(_))
    }
}

/// Clone-if-missing over a [`SourceControl`] backend
#[derive(Debug)]
pub struct SourceSynchronizer<'a, V> {
    layout: &'a Layout,
    vcs: &'a V,
}

impl<'a, V: SourceControl> SourceSynchronizer<'a, V> {
    /// Create a synchronizer for `layout`
    pub fn new(layout: &'a Layout, vcs: &'a V) -> Self {
        Self { layout, vcs }
    }

    /// Guarantee a working copy for `entry`
    pub fn ensure(&self, entry: &BuildOrderEntry) -> Result<SyncState, SkaError> {
        let name = match entry {
            BuildOrderEntry::SelfPackage(_) => return Ok(SyncState::NoWorkingCopy),
            BuildOrderEntry::External(name) => name,
        };

        let clone_path = self.layout.working_copy(name);
        if clone_path.exists() {
            tracing::info!("Source {name} exists, skipping clone");
            return Ok(SyncState::Existing(clone_path));
        }

        let descriptor = PackageDescriptor::load(&self.layout.pkg_defs(), name)?;
        filesystem::create_dir_all(&self.layout.src_dir())?;

        tracing::info!("Cloning source {name} from {}", descriptor.home());
        self.vcs.clone_repo(descriptor.home(), &clone_path)?;

        Ok(SyncState::Cloned(clone_path))
    }
}

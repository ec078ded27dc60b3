//! Update detection
//!
//! A package counts as updated when pulling its working copy changes the
//! name of its most recent tag. A repository without tags reads as `None`;
//! two `None` readings compare equal, so an untagged repository is never
//! reported as updated by a pull alone.

use std::path::Path;

use serde::Serialize;

use crate::error::SkaError;
use crate::infra::git::SourceControl;

/// Outcome of a pull as seen through the latest tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UpdateStatus {
    /// The latest tag changed
    Updated {
        before: Option<String>,
        after: Option<String>,
    },
    /// The latest tag is the same as before the pull
    Unchanged { tag: Option<String> },
}

impl UpdateStatus {
    /// Compare latest-tag readings taken before and after a pull
    pub fn from_tags(before: Option<String>, after: Option<String>) -> Self {
        if before == after {
            Self::Unchanged { tag: after }
        } else {
            Self::Updated { before, after }
        }
    }

    /// Whether the pull changed the latest tag
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }
}

/// Pulls a working copy and reports whether its latest tag moved
#[derive(Debug)]
pub struct UpdateDetector<'a, V> {
    vcs: &'a V,
}

impl<'a, V: SourceControl> UpdateDetector<'a, V> {
    /// Create a detector over `vcs`
    pub fn new(vcs: &'a V) -> Self {
        Self { vcs }
    }

    /// Read the latest tag, pull, and read it again
    pub fn pull_and_compare(&self, repo: &Path) -> Result<UpdateStatus, SkaError> {
        let before = self.vcs.latest_tag(repo)?;
        self.vcs.pull(repo)?;
        let after = self.vcs.latest_tag(repo)?;

        let status = UpdateStatus::from_tags(before, after);
        tracing::debug!("{}: {status:?}", repo.display());
        Ok(status)
    }
}

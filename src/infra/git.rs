//! Git operations
//!
//! Clones repositories and inspects tags using the gix crate. Pulling needs a
//! merge into the checked-out branch, which gix does not do, so pulls run the
//! `git` client as a subprocess.

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

/// Git operation errors
#[derive(Error, Debug)]
pub enum GitError {
    /// Failed to clone repository
    #[error("Failed to clone '{url}': {error}")]
    CloneFailed { url: String, error: String },

    /// Failed to pull into a working copy
    #[error("Failed to pull in '{path}': {error}")]
    PullFailed { path: PathBuf, error: String },

    /// Failed to list tags
    #[error("Failed to read tags in '{path}': {error}")]
    TagsFailed { path: PathBuf, error: String },

    /// Invalid repository
    #[error("Invalid repository at '{path}': {error}")]
    InvalidRepository { path: PathBuf, error: String },
}

/// Version control operations the builder needs
///
/// Implemented by [`GitOperations`] for real repositories.
pub trait SourceControl {
    /// Clone `url` into `dest`
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), GitError>;

    /// Fast-forward the working copy at `repo` from its upstream
    fn pull(&self, repo: &Path) -> Result<(), GitError>;

    /// Name of the most recent tag, or `None` if the repository has no tags
    ///
    /// Tags are ordered by the commit time of the commit they point to, with
    /// ties broken by tag name.
    fn latest_tag(&self, repo: &Path) -> Result<Option<String>, GitError>;
}

/// Git repository operations
#[derive(Debug, Clone)]
pub struct GitOperations {
    /// `git` executable used for pulls
    git_program: String,
}

impl GitOperations {
    /// Create a git operations handler using `git` from `PATH`
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Create a git operations handler using a specific `git` executable
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            git_program: program.into(),
        }
    }

    /// Get the `git` executable used for pulls
    pub fn program(&self) -> &str {
        &self.git_program
    }
}

impl Default for GitOperations {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceControl for GitOperations {
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), GitError> {
        tracing::debug!("gix clone {url} -> {}", dest.display());

        let mut prepare = gix::prepare_clone(url, dest).map_err(|e| GitError::CloneFailed {
            url: url.to_string(),
            error: e.to_string(),
        })?;

        // Full history: tags are needed for update detection
        let (mut checkout, _outcome) = prepare
            .fetch_then_checkout(gix::progress::Discard, &gix::interrupt::IS_INTERRUPTED)
            .map_err(|e| GitError::CloneFailed {
                url: url.to_string(),
                error: e.to_string(),
            })?;

        checkout
            .main_worktree(gix::progress::Discard, &gix::interrupt::IS_INTERRUPTED)
            .map_err(|e| GitError::CloneFailed {
                url: url.to_string(),
                error: e.to_string(),
            })?;

        Ok(())
    }

    fn pull(&self, repo: &Path) -> Result<(), GitError> {
        tracing::debug!("{} pull --ff-only in {}", self.git_program, repo.display());

        let output = Command::new(&self.git_program)
            .arg("-C")
            .arg(repo)
            .args(["pull", "--ff-only"])
            .output()
            .map_err(|e| GitError::PullFailed {
                path: repo.to_path_buf(),
                error: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(GitError::PullFailed {
                path: repo.to_path_buf(),
                error: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }

    fn latest_tag(&self, repo_path: &Path) -> Result<Option<String>, GitError> {
        let repo = gix::open(repo_path).map_err(|e| GitError::InvalidRepository {
            path: repo_path.to_path_buf(),
            error: e.to_string(),
        })?;

        let tags_failed = |error: String| GitError::TagsFailed {
            path: repo_path.to_path_buf(),
            error,
        };

        let platform = repo.references().map_err(|e| tags_failed(e.to_string()))?;
        let tags = platform.tags().map_err(|e| tags_failed(e.to_string()))?;

        let mut latest: Option<(i64, String)> = None;
        for reference in tags {
            let mut reference = reference.map_err(|e| tags_failed(e.to_string()))?;
            let name = reference.name().shorten().to_string();
            // Tags on non-commit objects sort first
            let seconds = reference
                .peel_to_commit()
                .ok()
                .and_then(|commit| commit.time().ok())
                .map_or(i64::MIN, |time| time.seconds);

            let candidate = (seconds, name);
            if latest.as_ref().map_or(true, |current| candidate > *current) {
                latest = Some(candidate);
            }
        }

        Ok(latest.map(|(_, name)| name))
    }
}

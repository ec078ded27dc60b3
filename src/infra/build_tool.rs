//! Build tool invocation
//!
//! Runs `conda build` (or a configured replacement) for one package
//! definition. Tests and publishing are disabled. The checked-out sources
//! root is handed to the recipe scripts through `SKA_TOP_SRC_DIR` on the
//! child process only.

use std::path::PathBuf;
use std::process::Command;

use serde::Serialize;

use crate::config::defaults::{BUILD_COMMAND, SRC_DIR_ENV};
use crate::error::BuildError;

/// Everything needed to build one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    /// Package name
    pub package: String,
    /// Package definition directory
    pub recipe_dir: PathBuf,
    /// Build output root (`--croot`)
    pub build_dir: PathBuf,
    /// Working copy root exported to the recipe scripts
    pub src_dir: PathBuf,
}

/// Result of one build tool run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BuildOutcome {
    /// The tool exited with status zero
    Success,
    /// The tool exited unsuccessfully; `code` is `None` if killed by a signal
    Failed { code: Option<i32> },
}

impl BuildOutcome {
    /// Whether the build succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Something that can build a package definition
pub trait BuildTool {
    /// Build one package, reporting the tool's exit status
    fn build(&self, request: &BuildRequest) -> Result<BuildOutcome, BuildError>;
}

/// `conda build` runner
#[derive(Debug, Clone)]
pub struct CondaBuild {
    /// Executable to run
    program: String,
    /// Extra arguments appended after the standard flags
    extra_args: Vec<String>,
}

impl CondaBuild {
    /// Create a runner for `conda` from `PATH`
    pub fn new() -> Self {
        Self::with_program(BUILD_COMMAND)
    }

    /// Create a runner for a specific executable
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            extra_args: Vec::new(),
        }
    }

    /// Append extra arguments to every invocation
    #[must_use]
    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    /// Executable this runner invokes
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Assemble the command for `request` without running it
    pub fn command(&self, request: &BuildRequest) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("build")
            .arg(&request.recipe_dir)
            .arg("--croot")
            .arg(&request.build_dir)
            .arg("--no-test")
            .arg("--no-anaconda-upload")
            .args(&self.extra_args)
            .env(SRC_DIR_ENV, &request.src_dir);
        cmd
    }
}

impl Default for CondaBuild {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildTool for CondaBuild {
    fn build(&self, request: &BuildRequest) -> Result<BuildOutcome, BuildError> {
        let mut cmd = self.command(request);
        tracing::debug!("Running {cmd:?}");

        let status = cmd.status().map_err(|e| BuildError::Spawn {
            package: request.package.clone(),
            command: self.program.clone(),
            error: e.to_string(),
        })?;

        if status.success() {
            Ok(BuildOutcome::Success)
        } else {
            Ok(BuildOutcome::Failed {
                code: status.code(),
            })
        }
    }
}

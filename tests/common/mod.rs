//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use ska_builder::core::layout::Layout;
use ska_builder::error::{BuildError, GitError};
use ska_builder::infra::build_tool::{BuildOutcome, BuildRequest, BuildTool};
use ska_builder::infra::git::SourceControl;
use tempfile::TempDir;

/// Test project context
///
/// Creates a temporary work root and recipes directory and provides
/// utilities for setting up build scenarios.
pub struct TestProject {
    /// Temporary directory holding `work/` and `recipes/`
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Work root
    pub fn root(&self) -> PathBuf {
        self.dir.path().join("work")
    }

    /// Recipes directory
    pub fn recipes(&self) -> PathBuf {
        self.dir.path().join("recipes")
    }

    /// Layout over the work root and recipes directory
    pub fn layout(&self) -> Layout {
        Layout::new(self.root(), self.recipes())
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the test project
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Check if a file exists in the test project
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Write the build order file
    pub fn write_build_order(&self, lines: &[&str]) {
        let mut content = lines.join("\n");
        content.push('\n');
        self.create_file("recipes/build_order.txt", &content);
    }

    /// Write a package descriptor with the given source URL
    pub fn add_package(&self, name: &str, home: &str) {
        self.create_file(
            &format!("recipes/pkg_defs/{name}/meta.yaml"),
            &sample_meta_yaml(name, home),
        );
    }

    /// Create the working copy directory for `name` as if it was cloned before
    pub fn add_working_copy(&self, name: &str) {
        self.create_dir(&format!("work/src/{name}"));
    }

    /// Write a settings file using `command` as the build tool
    pub fn write_config(&self, command: &str, on_failure: &str) -> PathBuf {
        let content = format!(
            "[paths]\nroot = {root:?}\nrecipes = {recipes:?}\n\n\
             [build]\ncommand = {command:?}\non_failure = {on_failure:?}\n",
            root = self.root().display().to_string(),
            recipes = self.recipes().display().to_string(),
        );
        self.create_file("config.toml", &content);
        self.dir.path().join("config.toml")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Package descriptor in the layout used by the Ska recipes
pub fn sample_meta_yaml(name: &str, home: &str) -> String {
    format!(
        "{{% set data = load_setup_py_data() %}}\n\
         package:\n  name: {lower}\n  version: {{{{ data.get('version') }}}}\n\
         source:\n  path: {{{{ SKA_TOP_SRC_DIR }}}}/{name}\n\n\
         build:\n  script: python setup.py install\n\n\
         about:\n  home: {home}\n  license: BSD\n  summary: {name} package\n",
        lower = name.to_lowercase(),
    )
}

/// In-memory version control backend
///
/// Every repository starts without tags. Pulling a repository listed in
/// `upstream_changes` adds one tag to it.
#[derive(Default)]
pub struct FakeVcs {
    /// Packages that gain a tag on pull
    pub upstream_changes: HashSet<String>,
    /// Packages whose clone fails
    pub unreachable: HashSet<String>,
    tags: RefCell<HashMap<String, u32>>,
    log: RefCell<Vec<String>>,
}

impl FakeVcs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark packages whose pull brings a new tag
    pub fn with_upstream_changes(mut self, names: &[&str]) -> Self {
        self.upstream_changes = names.iter().map(ToString::to_string).collect();
        self
    }

    /// Mark packages whose clone fails
    pub fn with_unreachable(mut self, names: &[&str]) -> Self {
        self.unreachable = names.iter().map(ToString::to_string).collect();
        self
    }

    /// Calls in the order they happened, as `op:name`
    pub fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    /// Calls of one kind, as package names
    pub fn calls(&self, op: &str) -> Vec<String> {
        let prefix = format!("{op}:");
        self.log
            .borrow()
            .iter()
            .filter_map(|entry| entry.strip_prefix(&prefix).map(ToString::to_string))
            .collect()
    }

    fn record(&self, op: &str, path: &Path) -> String {
        let name = repo_name(path);
        self.log.borrow_mut().push(format!("{op}:{name}"));
        name
    }
}

impl SourceControl for FakeVcs {
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<(), GitError> {
        let name = self.record("clone", dest);
        if self.unreachable.contains(&name) {
            return Err(GitError::CloneFailed {
                url: url.to_string(),
                error: "could not resolve host".to_string(),
            });
        }
        std::fs::create_dir_all(dest).expect("Failed to create working copy");
        Ok(())
    }

    fn pull(&self, repo: &Path) -> Result<(), GitError> {
        let name = self.record("pull", repo);
        if self.upstream_changes.contains(&name) {
            *self.tags.borrow_mut().entry(name).or_insert(0) += 1;
        }
        Ok(())
    }

    fn latest_tag(&self, repo: &Path) -> Result<Option<String>, GitError> {
        let name = self.record("tag", repo);
        Ok(self
            .tags
            .borrow()
            .get(&name)
            .map(|count| format!("v0.{count}")))
    }
}

/// Build tool that records requests instead of running conda
#[derive(Default)]
pub struct FakeBuild {
    /// Packages whose build exits with status 1
    pub failing: HashSet<String>,
    requests: RefCell<Vec<BuildRequest>>,
}

impl FakeBuild {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark packages whose build fails
    pub fn with_failing(mut self, names: &[&str]) -> Self {
        self.failing = names.iter().map(ToString::to_string).collect();
        self
    }

    /// Packages built, in order
    pub fn built(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|r| r.package.clone())
            .collect()
    }

    /// Requests received, in order
    pub fn requests(&self) -> Vec<BuildRequest> {
        self.requests.borrow().clone()
    }
}

impl BuildTool for FakeBuild {
    fn build(&self, request: &BuildRequest) -> Result<BuildOutcome, BuildError> {
        self.requests.borrow_mut().push(request.clone());
        if self.failing.contains(&request.package) {
            Ok(BuildOutcome::Failed { code: Some(1) })
        } else {
            Ok(BuildOutcome::Success)
        }
    }
}

fn repo_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

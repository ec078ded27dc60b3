//! Build orchestration logic
//!
//! Walks the build order top to bottom, keeps each package's working copy
//! present and current, and decides which packages to hand to the build
//! tool. The order of the build order file is the only dependency contract;
//! nothing is reordered or run in parallel.
//!
//! Descriptor, git and filesystem errors abort the remaining sequence. A
//! build that exits unsuccessfully is recorded in the [`BuildReport`] and,
//! depending on the [`FailurePolicy`], either stops the run or is passed
//! over.

use indicatif::ProgressBar;
use serde::Serialize;

use crate::config::defaults::SELF_PACKAGE;
use crate::core::build_order::{BuildOrder, BuildOrderEntry};
use crate::core::layout::Layout;
use crate::core::settings::{BuilderSettings, FailurePolicy};
use crate::core::sync::{SourceSynchronizer, SyncState};
use crate::core::update::UpdateDetector;
use crate::error::SkaError;
use crate::infra::build_tool::{BuildOutcome, BuildRequest, BuildTool, CondaBuild};
use crate::infra::git::{GitOperations, SourceControl};

/// A build that exited unsuccessfully
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedBuild {
    /// Package name
    pub package: String,
    /// Exit code, `None` if the tool was killed by a signal
    pub code: Option<i32>,
}

/// What happened to each package during a build run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Packages built successfully, in build order
    pub built: Vec<String>,
    /// Packages passed over because their source did not change
    pub skipped: Vec<String>,
    /// Packages whose build failed
    pub failed: Vec<FailedBuild>,
}

impl BuildReport {
    /// Whether any build failed
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// What happened to each package during a clone run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CloneReport {
    /// Packages cloned during this run
    pub cloned: Vec<String>,
    /// Packages whose working copy was already present
    pub existing: Vec<String>,
    /// Packages without a source repository (the Ska environment itself)
    pub skipped: Vec<String>,
}

/// Build orchestrator
///
/// Generic over the version control backend and the build tool so the
/// sequencing policy can be driven without git or conda.
pub struct BuildOrchestrator<V = GitOperations, B = CondaBuild> {
    layout: Layout,
    self_name: String,
    policy: FailurePolicy,
    vcs: V,
    tool: B,
    progress: ProgressBar,
}

impl BuildOrchestrator {
    /// Create an orchestrator backed by git and the configured build tool
    pub fn from_settings(settings: &BuilderSettings) -> Self {
        let tool = CondaBuild::with_program(settings.build_command())
            .with_extra_args(settings.build.extra_args.clone());

        Self::new(settings.layout(), GitOperations::new(), tool)
            .with_self_name(settings.self_name())
            .with_failure_policy(settings.build.on_failure)
    }
}

impl<V: SourceControl, B: BuildTool> BuildOrchestrator<V, B> {
    /// Create a new build orchestrator
    pub fn new(layout: Layout, vcs: V, tool: B) -> Self {
        Self {
            layout,
            self_name: SELF_PACKAGE.to_string(),
            policy: FailurePolicy::default(),
            vcs,
            tool,
            progress: ProgressBar::hidden(),
        }
    }

    /// Set the name that denotes the Ska environment itself
    #[must_use]
    pub fn with_self_name(mut self, name: &str) -> Self {
        self.self_name = name.to_string();
        self
    }

    /// Set the build failure policy
    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Report per-package progress on `progress`
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Directory layout in use
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Version control backend
    pub fn vcs(&self) -> &V {
        &self.vcs
    }

    /// Build tool
    pub fn tool(&self) -> &B {
        &self.tool
    }

    /// Classify a package name given on its own
    pub fn entry(&self, name: &str) -> BuildOrderEntry {
        BuildOrderEntry::classify(name, &self.self_name)
    }

    /// Read the build order file
    pub fn build_order(&self) -> Result<BuildOrder, SkaError> {
        Ok(BuildOrder::load(
            &self.layout.build_order_file(),
            &self.self_name,
        )?)
    }

    /// Make sure one package has a working copy
    pub fn clone_one_package(&self, name: &str) -> Result<CloneReport, SkaError> {
        let mut report = CloneReport::default();
        self.clone_entry(&self.entry(name), &mut report)?;
        Ok(report)
    }

    /// Make sure every package in the build order has a working copy
    pub fn clone_all_packages(&self) -> Result<CloneReport, SkaError> {
        let order = self.build_order()?;
        self.start_progress(&order);

        let mut report = CloneReport::default();
        for entry in &order {
            self.progress.set_message(entry.name().to_string());
            self.clone_entry(entry, &mut report)?;
            self.progress.inc(1);
        }

        self.progress.finish_and_clear();
        Ok(report)
    }

    /// Pull one package's source and build it unconditionally
    pub fn build_one_package(&self, name: &str) -> Result<BuildReport, SkaError> {
        let entry = self.entry(name);
        let sync = self.synchronizer().ensure(&entry)?;
        if let Some(path) = sync.path() {
            tracing::info!("Pulling {name}");
            self.vcs.pull(path)?;
        }

        let mut report = BuildReport::default();
        self.build_entry(&entry, &mut report)?;
        Ok(report)
    }

    /// Build packages whose source changed
    ///
    /// With `new_only` set, a package is built if it was cloned during this
    /// run, is the Ska environment itself, or its latest tag changed on pull.
    /// With `new_only` cleared every package is pulled and built.
    pub fn build_updated_packages(&self, new_only: bool) -> Result<BuildReport, SkaError> {
        let order = self.build_order()?;
        self.start_progress(&order);

        let synchronizer = self.synchronizer();
        let detector = UpdateDetector::new(&self.vcs);
        let mut report = BuildReport::default();

        for entry in &order {
            self.progress.set_message(entry.name().to_string());

            let updated = match synchronizer.ensure(entry)? {
                SyncState::NoWorkingCopy | SyncState::Cloned(_) => true,
                SyncState::Existing(path) => detector.pull_and_compare(&path)?.is_updated(),
            };

            if updated || !new_only {
                self.build_entry(entry, &mut report)?;
            } else {
                tracing::info!("Package {entry} unchanged, skipping");
                report.skipped.push(entry.name().to_string());
            }

            self.progress.inc(1);
        }

        self.progress.finish_and_clear();
        Ok(report)
    }

    /// Pull and build every package in the build order
    pub fn build_all_packages(&self) -> Result<BuildReport, SkaError> {
        self.build_updated_packages(false)
    }

    fn synchronizer(&self) -> SourceSynchronizer<'_, V> {
        SourceSynchronizer::new(&self.layout, &self.vcs)
    }

    fn start_progress(&self, order: &BuildOrder) {
        self.progress.set_length(order.len() as u64);
        self.progress.set_position(0);
    }

    fn clone_entry(
        &self,
        entry: &BuildOrderEntry,
        report: &mut CloneReport,
    ) -> Result<(), SkaError> {
        let name = entry.name().to_string();
        match self.synchronizer().ensure(entry)? {
            SyncState::NoWorkingCopy => report.skipped.push(name),
            SyncState::Existing(_) => report.existing.push(name),
            SyncState::Cloned(_) => report.cloned.push(name),
        }
        Ok(())
    }

    fn build_entry(
        &self,
        entry: &BuildOrderEntry,
        report: &mut BuildReport,
    ) -> Result<(), SkaError> {
        let name = entry.name();
        tracing::info!("Building package {name}");

        let request = BuildRequest {
            package: name.to_string(),
            recipe_dir: self.layout.package_def(name),
            build_dir: self.layout.build_dir(),
            src_dir: self.layout.src_dir(),
        };
        let outcome = self.progress.suspend(|| self.tool.build(&request))?;

        match outcome {
            BuildOutcome::Success => {
                tracing::info!("Built package {name}");
                report.built.push(name.to_string());
            }
            BuildOutcome::Failed { code } => {
                tracing::warn!("Build of {name} failed with exit code {code:?}");
                report.failed.push(FailedBuild {
                    package: name.to_string(),
                    code,
                });
                if self.policy == FailurePolicy::Abort {
                    return Err(SkaError::BuildFailed {
                        package: name.to_string(),
                        code,
                        report: Box::new(std::mem::take(report)),
                    });
                }
            }
        }
        Ok(())
    }
}

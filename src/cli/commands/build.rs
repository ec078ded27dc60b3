//! Build command implementation
//!
//! Implements `ska-builder build`, `build-updated` and `build-all`.

use anyhow::{bail, Context, Result};

use crate::cli::output::{
    create_build_bar, is_json, print_detail, print_info, print_success, print_warning, status,
};
use crate::core::builder::{BuildOrchestrator, BuildReport};
use crate::core::settings::BuilderSettings;
use crate::error::SkaError;

/// Which packages to build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildTarget {
    /// One named package, unconditionally
    One(String),
    /// Packages from the build order, gated on updates when `new_only` is set
    Updated { new_only: bool },
    /// Every package from the build order
    All,
}

impl BuildTarget {
    /// Whether the target walks the build order
    pub fn walks_build_order(&self) -> bool {
        !matches!(self, Self::One(_))
    }
}

/// Execute a build command
pub fn execute(settings: &BuilderSettings, target: BuildTarget) -> Result<()> {
    let mut orchestrator = BuildOrchestrator::from_settings(settings);
    if target.walks_build_order() {
        orchestrator = orchestrator.with_progress(create_build_bar(0));
    }

    tracing::info!(
        "Work root {}, recipes {}",
        orchestrator.layout().root().display(),
        orchestrator.layout().recipes().display()
    );

    let result = match &target {
        BuildTarget::One(package) => {
            print_info(&format!("Building {package}"));
            orchestrator.build_one_package(package)
        }
        BuildTarget::Updated { new_only } => {
            print_info("Building updated packages");
            orchestrator.build_updated_packages(*new_only)
        }
        BuildTarget::All => {
            print_info("Building all packages");
            orchestrator.build_all_packages()
        }
    };

    // An aborted run still reports what it did before stopping
    if let Err(SkaError::BuildFailed { report, .. }) = &result {
        display_report(report)?;
    }

    let report = match &target {
        BuildTarget::One(package) => {
            result.with_context(|| format!("Failed to build package '{package}'"))?
        }
        _ => result.context("Build run aborted")?,
    };

    display_report(&report)?;

    if report.has_failures() {
        let names: Vec<&str> = report.failed.iter().map(|f| f.package.as_str()).collect();
        bail!("{} build(s) failed: {}", names.len(), names.join(", "));
    }
    Ok(())
}

/// Print the outcome of a build run
fn display_report(report: &BuildReport) -> Result<()> {
    if is_json() {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    print_success(&format!(
        "Build run complete: {} built, {} skipped, {} failed",
        report.built.len(),
        report.skipped.len(),
        report.failed.len()
    ));
    for name in &report.built {
        print_detail(&format!("{} {name}", status::SUCCESS));
    }
    for name in &report.skipped {
        print_detail(&format!("- {name} (unchanged)"));
    }
    for failed in &report.failed {
        let code = failed
            .code
            .map_or_else(|| "signal".to_string(), |c| c.to_string());
        print_warning(&format!("{} failed (exit {code})", failed.package));
    }
    Ok(())
}

//! Clone command implementation
//!
//! Implements `ska-builder clone` to pre-stage package sources.

use anyhow::{Context, Result};

use crate::cli::output::{create_build_bar, is_json, print_detail, print_success};
use crate::core::builder::BuildOrchestrator;
use crate::core::settings::BuilderSettings;

/// Execute the clone command
pub fn execute(settings: &BuilderSettings, package: Option<&str>) -> Result<()> {
    let orchestrator = BuildOrchestrator::from_settings(settings);

    let report = match package {
        Some(name) => orchestrator
            .clone_one_package(name)
            .with_context(|| format!("Failed to clone package '{name}'"))?,
        None => orchestrator
            .with_progress(create_build_bar(0))
            .clone_all_packages()
            .context("Clone run aborted")?,
    };

    if is_json() {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_success(&format!(
        "{} cloned, {} already present",
        report.cloned.len(),
        report.existing.len()
    ));
    for name in &report.cloned {
        print_detail(&format!("cloned {name}"));
    }
    for name in &report.existing {
        print_detail(&format!("exists {name}"));
    }
    Ok(())
}

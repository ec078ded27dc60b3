//! CLI command for `ska-builder doctor`
//!
//! Checks system dependencies and the recipes directory, and reports issues
//! with suggestions.

use anyhow::Result;

use crate::cli::output::{is_json, is_quiet, print_detail, print_info, print_success, status};
use crate::core::doctor::run_doctor;
use crate::core::settings::BuilderSettings;

/// Execute the doctor command
pub fn execute(settings: &BuilderSettings) -> Result<()> {
    let report = run_doctor(settings);

    if is_json() {
        let json_result = serde_json::json!({
            "status": if report.all_passed() { "success" } else { "error" },
            "checks": report.checks,
            "passed_count": report.passed_count(),
            "total_count": report.checks.len()
        });
        println!("{}", serde_json::to_string_pretty(&json_result)?);
    } else if is_quiet() {
        for check in report.failed() {
            eprintln!("{} Missing: {}", status::ERROR, check.name);
        }
    } else {
        print_info("Checking system dependencies...");
        println!();

        for check in &report.checks {
            let version_str = check
                .version
                .as_ref()
                .map(|v| format!(" (v{v})"))
                .unwrap_or_default();

            if check.passed {
                println!("  {} {}{version_str}", status::SUCCESS, check.name);
            } else {
                println!("  {} {}", status::ERROR, check.name);
                if let Some(error) = &check.error {
                    print_detail(&format!("Error: {error}"));
                }
                if let Some(suggestion) = &check.suggestion {
                    print_detail(&format!("Suggestion: {suggestion}"));
                }
            }
        }

        println!();
        let passed = report.passed_count();
        let total = report.checks.len();
        if report.all_passed() {
            print_success(&format!("All checks passed ({passed}/{total})"));
        } else {
            println!("{} {passed}/{total} checks passed", status::ERROR);
        }
    }

    if !report.all_passed() {
        return Err(anyhow::anyhow!(
            "{} check(s) failed. Run 'ska-builder doctor' for details.",
            report.failed().len()
        ));
    }
    Ok(())
}

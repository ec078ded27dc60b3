//! Doctor command logic
//!
//! Checks that the external tools and input files a build run depends on
//! are in place, and reports issues with suggestions.

use serde::Serialize;

use crate::core::layout::Layout;
use crate::core::settings::BuilderSettings;

/// Result of a single dependency check
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    /// Name of the dependency being checked
    pub name: String,
    /// Whether the check passed
    pub passed: bool,
    /// Version if available
    pub version: Option<String>,
    /// Error message if check failed
    pub error: Option<String>,
    /// Suggestion for fixing the issue
    pub suggestion: Option<String>,
}

impl CheckResult {
    /// Create a passing check result
    pub fn pass(name: &str, version: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            version,
            error: None,
            suggestion: None,
        }
    }

    /// Create a failing check result
    pub fn fail(name: &str, error: &str, suggestion: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            version: None,
            error: Some(error.to_string()),
            suggestion: suggestion.map(String::from),
        }
    }
}

/// Overall doctor report
#[derive(Debug, Default, Serialize)]
pub struct DoctorReport {
    /// Individual check results
    pub checks: Vec<CheckResult>,
}

impl DoctorReport {
    /// Create a new empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a check result
    pub fn add_check(&mut self, result: CheckResult) {
        self.checks.push(result);
    }

    /// Check if all checks passed
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Count passed checks
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Get all failed checks
    pub fn failed(&self) -> Vec<&CheckResult> {
        self.checks.iter().filter(|c| !c.passed).collect()
    }
}

/// Version reported by `command --version`, if the command is on `PATH`
pub fn check_command_available(command: &str) -> Option<String> {
    let path = which::which(command).ok()?;
    let output = std::process::Command::new(path)
        .arg("--version")
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let combined = format!("{stdout}{stderr}");
    Some(extract_version(&combined).unwrap_or_else(|| "unknown".to_string()))
}

/// Extract version string from command output
fn extract_version(output: &str) -> Option<String> {
    // Patterns like "1.2.3" or "v1.2.3"
    let version_regex = regex::Regex::new(r"v?(\d+\.\d+(?:\.\d+)?(?:-\w+)?)").ok()?;
    version_regex
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Check Git availability
pub fn check_git() -> CheckResult {
    match check_command_available("git") {
        Some(version) => CheckResult::pass("Git", Some(version)),
        None => CheckResult::fail(
            "Git",
            "Git not found in PATH",
            Some("Install Git from https://git-scm.com/ or use your package manager"),
        ),
    }
}

/// Check that the configured build tool is available
pub fn check_build_tool(command: &str) -> CheckResult {
    let name = format!("Build tool ({command})");
    match check_command_available(command) {
        Some(version) => CheckResult::pass(&name, Some(version)),
        None => CheckResult::fail(
            &name,
            &format!("'{command}' not found in PATH"),
            Some(&format!(
                "Install '{command}' or set [build] command in the settings file"
            )),
        ),
    }
}

/// Check the recipes directory layout
pub fn check_recipes(layout: &Layout) -> Vec<CheckResult> {
    let build_order = layout.build_order_file();
    let build_order_check = if build_order.is_file() {
        CheckResult::pass("Build order", None)
    } else {
        CheckResult::fail(
            "Build order",
            &format!("'{}' not found", build_order.display()),
            Some("Point --recipes at a checkout containing build_order.txt"),
        )
    };

    let pkg_defs = layout.pkg_defs();
    let pkg_defs_check = if pkg_defs.is_dir() {
        CheckResult::pass("Package definitions", None)
    } else {
        CheckResult::fail(
            "Package definitions",
            &format!("'{}' not found", pkg_defs.display()),
            Some("Point --recipes at a checkout containing pkg_defs/"),
        )
    };

    vec![build_order_check, pkg_defs_check]
}

/// Run all doctor checks
pub fn run_doctor(settings: &BuilderSettings) -> DoctorReport {
    let mut report = DoctorReport::new();

    report.add_check(check_git());
    report.add_check(check_build_tool(settings.build_command()));
    for check in check_recipes(&settings.layout()) {
        report.add_check(check);
    }

    report
}

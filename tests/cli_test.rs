//! Integration tests for the `ska-builder` binary
//!
//! Runs the binary against a temporary recipes directory, with `true` and
//! `false` standing in for the build tool.

mod common;

use std::process::{Command, Output};

use assert_fs::prelude::*;
use common::TestProject;
use predicates::prelude::*;

/// Helper to run ska-builder with a settings file from `project`
fn run_with_config(project: &TestProject, config: &std::path::Path, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ska-builder"));
    cmd.current_dir(project.path())
        .env_remove("SKA_ROOT")
        .env_remove("SKA_RECIPES_DIR")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(config);
    for arg in args {
        cmd.arg(arg);
    }
    cmd.output().expect("Failed to execute ska-builder")
}

/// Helper to run ska-builder with `true` as the build tool
fn run(project: &TestProject, args: &[&str]) -> Output {
    let config = project.write_config("true", "continue");
    run_with_config(project, &config, args)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ============================================
// list
// ============================================

#[test]
fn test_list_shows_build_order() {
    let project = TestProject::new();
    project.write_build_order(&["ska", "Ska.Shell", "# kadi", "", "xija"]);

    let output = run(&project, &["list"]);
    let out = stdout(&output);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(predicate::str::contains("ska (self)").eval(&out));
    assert!(predicate::str::contains("Ska.Shell").eval(&out));
    assert!(predicate::str::contains("xija").eval(&out));
    assert!(predicate::str::contains("kadi").not().eval(&out));
}

#[test]
fn test_list_json() {
    let project = TestProject::new();
    project.write_build_order(&["ska", "Ska.Shell"]);

    let output = run(&project, &["--json", "list"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json[0]["kind"], "self_package");
    assert_eq!(json[0]["name"], "ska");
    assert_eq!(json[1]["kind"], "external");
    assert_eq!(json[1]["name"], "Ska.Shell");
}

#[test]
fn test_list_missing_build_order_fails() {
    let project = TestProject::new();

    let output = run(&project, &["list"]);

    assert!(!output.status.success());
    assert!(predicate::str::contains("build_order.txt").eval(&stderr(&output)));
}

// ============================================
// build / build-updated / build-all
// ============================================

#[test]
fn test_build_updated_builds_self_package() {
    let project = TestProject::new();
    project.write_build_order(&["ska"]);

    let output = run(&project, &["--json", "build-updated"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["built"], serde_json::json!(["ska"]));
    assert_eq!(json["failed"], serde_json::json!([]));
}

#[test]
fn test_build_one_package() {
    let project = TestProject::new();

    let output = run(&project, &["build", "ska"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(predicate::str::contains("1 built").eval(&stdout(&output)));
}

#[test]
fn test_failed_build_exits_nonzero() {
    let project = TestProject::new();
    project.write_build_order(&["ska"]);
    let config = project.write_config("false", "continue");

    let output = run_with_config(&project, &config, &["build-all"]);

    assert!(!output.status.success());
    assert!(predicate::str::contains("build(s) failed: ska").eval(&stderr(&output)));
}

#[test]
fn test_failed_build_with_abort_policy() {
    let project = TestProject::new();
    project.write_build_order(&["ska"]);
    let config = project.write_config("false", "abort");

    let output = run_with_config(&project, &config, &["build-all"]);

    assert!(!output.status.success());
    assert!(predicate::str::contains("Build of package 'ska' failed").eval(&stderr(&output)));
}

#[test]
fn test_aborted_run_prints_partial_report() {
    let project = TestProject::new();
    project.write_build_order(&["ska", "pkgA"]);
    project.add_package("pkgA", "https://github.com/sot/pkgA");
    let config = project.write_config("false", "abort");

    let output = run_with_config(&project, &config, &["--json", "build-all"]);

    assert!(!output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["built"], serde_json::json!([]));
    assert_eq!(json["failed"][0]["package"], "ska");
    assert_eq!(json["failed"][0]["code"], 1);
    assert!(!project.file_exists("work/src/pkgA"));
}

#[test]
fn test_missing_descriptor_aborts_run() {
    let project = TestProject::new();
    project.write_build_order(&["ska", "maude"]);

    let output = run(&project, &["build-updated"]);

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(predicate::str::contains("maude").eval(&err));
    assert!(predicate::str::contains("meta.yaml").eval(&err));
}

#[test]
fn test_json_error_output() {
    let project = TestProject::new();

    let output = run(&project, &["--json", "build-all"]);

    assert!(!output.status.success());
    let json: serde_json::Value = serde_json::from_str(stderr(&output).trim()).unwrap();
    assert_eq!(json["status"], "error");
}

// ============================================
// clone
// ============================================

#[test]
fn test_clone_reuses_existing_working_copy() {
    let project = TestProject::new();
    project.write_build_order(&["ska", "Ska.Shell"]);
    project.add_working_copy("Ska.Shell");

    let output = run(&project, &["--json", "clone"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["existing"], serde_json::json!(["Ska.Shell"]));
    assert_eq!(json["skipped"], serde_json::json!(["ska"]));
}

#[test]
fn test_clone_creates_src_dir_before_cloning() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("recipes/build_order.txt")
        .write_str("Ska.Shell\n")
        .unwrap();
    temp.child("recipes/pkg_defs/Ska.Shell/meta.yaml")
        .write_str(&common::sample_meta_yaml("Ska.Shell", "not a url"))
        .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_ska-builder"))
        .env_remove("SKA_BUILDER_CONFIG")
        .env("SKA_BUILDER_CONFIG_DIR", temp.path())
        .arg("--root")
        .arg(temp.child("work").path())
        .arg("--recipes")
        .arg(temp.child("recipes").path())
        .arg("clone")
        .output()
        .expect("Failed to execute ska-builder");

    // The clone fails, but only after the source root exists
    assert!(!output.status.success());
    temp.child("work/src").assert(predicate::path::is_dir());
}

#[test]
fn test_settings_read_from_config_dir_env() {
    let project = TestProject::new();
    project.write_build_order(&["ska", "Ska.Shell"]);
    project.add_package("Ska.Shell", "not a url");
    project.write_config("true", "continue");

    let run_in_config_dir = |args: &[&str]| {
        Command::new(env!("CARGO_BIN_EXE_ska-builder"))
            .env_remove("SKA_BUILDER_CONFIG")
            .env_remove("SKA_ROOT")
            .env_remove("SKA_RECIPES_DIR")
            .env("SKA_BUILDER_CONFIG_DIR", project.path())
            .args(args)
            .output()
            .expect("Failed to execute ska-builder")
    };

    // recipes from the settings file
    let output = run_in_config_dir(&["--json", "list"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json[1]["name"], "Ska.Shell");

    // root from the settings file
    let output = run_in_config_dir(&["clone"]);
    assert!(!output.status.success());
    assert!(project.file_exists("work/src"));
}

// ============================================
// doctor / help
// ============================================

#[test]
fn test_doctor_json_reports_checks() {
    let project = TestProject::new();
    project.write_build_order(&["ska"]);
    project.create_dir("recipes/pkg_defs");

    let output = run(&project, &["--json", "doctor"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();

    let names: Vec<&str> = json["checks"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["name"].as_str())
        .collect();
    assert!(names.contains(&"Git"));
    assert!(names.contains(&"Build tool (true)"));
    assert!(names.contains(&"Build order"));
    assert_eq!(json["total_count"], 4);
}

#[test]
fn test_doctor_reports_missing_recipes() {
    let project = TestProject::new();

    let output = run(&project, &["doctor"]);

    assert!(!output.status.success());
    assert!(predicate::str::contains("Build order").eval(&stdout(&output)));
}

#[test]
fn test_help_ignores_malformed_settings() {
    let project = TestProject::new();
    project.create_file("config.toml", "[paths\nroot = ");
    let config = project.path().join("config.toml");

    let output = run_with_config(&project, &config, &[]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(predicate::str::contains("build-updated").eval(&stdout(&output)));
}

#[test]
fn test_no_subcommand_prints_help() {
    let project = TestProject::new();

    let output = run(&project, &[]);

    assert!(output.status.success());
    assert!(predicate::str::contains("build-updated").eval(&stdout(&output)));
}

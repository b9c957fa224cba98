//! End-to-end tests for the `write-conan` binary.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const VARS: [&str; 4] = ["BUILD_TYPE", "STATIC_BUILD", "QARCHIVE_VERSION", "QT_VERSION"];

/// Run write-conan in `dir` with only the given recipe variables set.
fn run_in(dir: &Path, env: &[(&str, &str)], args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_write-conan"));
    cmd.current_dir(dir).args(args);
    for var in VARS {
        cmd.env_remove(var);
    }
    for (key, value) in env {
        cmd.env(key, value);
    }
    cmd.output().unwrap()
}

#[test]
fn test_defaults() {
    let dir = TempDir::new().unwrap();

    let output = run_in(dir.path(), &[], &[]);
    assert!(output.status.success());

    let recipe = std::fs::read_to_string(dir.path().join("conanfile.py")).unwrap();
    assert!(recipe.contains("Release"));
    assert!(recipe.contains("version = \"2.2.7\""));
    assert!(recipe.contains("qt/5.15.2"));
    assert!(recipe.contains("self.options[\"qt\"].shared = True"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("BUILD_TYPE: Release"));
    assert!(stdout.contains("SHARED BUILD: True"));
    assert!(stdout.contains("QT_VERSION: 5.15.2"));
    assert!(stdout.contains("QARCHIVE_VERSION: 2.2.7"));
    assert!(stdout.contains("File Written."));
}

#[test]
fn test_environment_overrides() {
    let dir = TempDir::new().unwrap();

    let output = run_in(
        dir.path(),
        &[
            ("BUILD_TYPE", "Debug"),
            ("STATIC_BUILD", ""),
            ("QARCHIVE_VERSION", "2.3.0"),
            ("QT_VERSION", "5.15.11"),
        ],
        &[],
    );
    assert!(output.status.success());

    let recipe = std::fs::read_to_string(dir.path().join("conanfile.py")).unwrap();
    assert!(recipe.contains("# build_type: Debug"));
    assert!(recipe.contains("version = \"2.3.0\""));
    assert!(recipe.contains("qt/5.15.11"));
    assert!(recipe.contains("self.options[\"qt\"].shared = False"));
}

#[test]
fn test_custom_output_path() {
    let dir = TempDir::new().unwrap();

    let output = run_in(dir.path(), &[], &["--output", "recipes/conanfile.py"]);
    // Parent directories are not created
    assert!(!output.status.success());

    std::fs::create_dir(dir.path().join("recipes")).unwrap();
    let output = run_in(dir.path(), &[], &["--output", "recipes/conanfile.py"]);
    assert!(output.status.success());
    assert!(dir.path().join("recipes/conanfile.py").is_file());
    assert!(!dir.path().join("conanfile.py").exists());
}

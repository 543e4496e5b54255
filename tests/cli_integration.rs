//! CLI integration tests for bffgen.
//!
//! These tests drive the binary against solution snapshots written to a
//! temporary directory.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the bffgen binary command.
fn bffgen() -> Command {
    let mut cmd = Command::cargo_bin("bffgen").unwrap();
    cmd.env_remove("BFFGEN_SOLUTION");
    cmd
}

/// Create a temporary directory for test solutions.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

const GAME: &str = r#"
name = "Game"

[[projects]]
name = "app"
kind = "native-executable"
folder = "app"
requires = ["engine"]

[[projects.configurations]]
name = "Debug"
platform = "x64"

[projects.configurations.native]
include_paths = ["./include"]
libraries = ["user32", "$(OutDir)generated"]

[[projects]]
name = "engine"
kind = "native-shared-library"
folder = "engine"
requires = ["core"]

[[projects.configurations]]
name = "Debug"
platform = "x64"

[[projects]]
name = "core"
kind = "native-static-library"
folder = "core"

[[projects.configurations]]
name = "Debug"
platform = "x64"

[[projects]]
name = "Tools"
kind = "managed-library"
folder = "tools"
files = ["Tool.cs"]
requires = ["core"]

[[projects.configurations]]
name = "Debug"
platform = "x64"

[projects.configurations.managed]
warnings_as_errors = true
defined_constants = ["FOO", "BAR"]
"#;

fn write_solution(dir: &Path, contents: &str) {
    fs::write(dir.join("Solution.toml"), contents).unwrap();
}

// ============================================================================
// bffgen generate
// ============================================================================

#[test]
fn test_generate_writes_descriptors() {
    let tmp = temp_dir();
    write_solution(tmp.path(), GAME);

    bffgen()
        .arg("generate")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Finished `Game`"));

    let solution = fs::read_to_string(tmp.path().join("Game.bff")).unwrap();
    let core = solution.find("#include \"core/core.bff\"").unwrap();
    let engine = solution.find("#include \"engine/engine.bff\"").unwrap();
    let app = solution.find("#include \"app/app.bff\"").unwrap();
    assert!(core < engine && engine < app);
    assert!(solution.contains("Alias('All') { .Targets = { 'app', 'engine', 'core', 'Tools' } }"));

    let app = fs::read_to_string(tmp.path().join("app/app.bff")).unwrap();
    assert!(app.contains("Executable('app-x64-Debug')"));
    assert!(app.contains(".Debug_x64_Libraries = ' user32.lib'"));
    assert!(app.contains(".PreBuildDependencies = { 'engine-x64-Debug' }"));

    let tools = fs::read_to_string(tmp.path().join("tools/Tools.bff")).unwrap();
    assert!(tools.contains("/warnaserror+ /define:FOO /define:BAR"));
}

#[test]
fn test_generate_twice_is_stable() {
    let tmp = temp_dir();
    write_solution(tmp.path(), GAME);

    bffgen().arg("generate").current_dir(tmp.path()).assert().success();
    let first = fs::read(tmp.path().join("Game.bff")).unwrap();

    bffgen()
        .arg("generate")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("0 written, 5 unchanged"));
    assert_eq!(fs::read(tmp.path().join("Game.bff")).unwrap(), first);
}

#[test]
fn test_generate_dry_run() {
    let tmp = temp_dir();
    write_solution(tmp.path(), GAME);

    bffgen()
        .args(["generate", "--dry-run"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Would write"));

    assert!(!tmp.path().join("Game.bff").exists());
}

#[test]
fn test_generate_from_subdirectory() {
    let tmp = temp_dir();
    write_solution(tmp.path(), GAME);
    let nested = tmp.path().join("app/src");
    fs::create_dir_all(&nested).unwrap();

    bffgen().arg("generate").current_dir(&nested).assert().success();
    assert!(tmp.path().join("Game.bff").exists());
}

#[test]
fn test_generate_with_explicit_solution() {
    let tmp = temp_dir();
    let sln = tmp.path().join("sln");
    fs::create_dir_all(&sln).unwrap();
    write_solution(&sln, GAME);

    bffgen()
        .args(["generate", "--solution", "sln/Solution.toml"])
        .current_dir(tmp.path())
        .assert()
        .success();
    assert!(sln.join("Game.bff").exists());
}

#[test]
fn test_generate_respects_ignore() {
    let tmp = temp_dir();
    write_solution(tmp.path(), GAME);
    fs::create_dir_all(tmp.path().join(".bffgen")).unwrap();
    fs::write(tmp.path().join(".bffgen/config.toml"), "ignore = [\"core\"]\n").unwrap();

    bffgen().arg("generate").current_dir(tmp.path()).assert().success();

    let solution = fs::read_to_string(tmp.path().join("Game.bff")).unwrap();
    assert!(!solution.contains("core.bff"));
    assert!(!solution.contains("'core'"));
    assert!(!tmp.path().join("core/core.bff").exists());
}

#[test]
fn test_generate_rejects_malformed_config() {
    let tmp = temp_dir();
    write_solution(tmp.path(), GAME);
    fs::write(tmp.path().join("custom.toml"), "ignore = [\"core\"\n").unwrap();

    bffgen()
        .args(["generate", "--config", "custom.toml"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config file"));

    assert!(!tmp.path().join("Game.bff").exists());
}

#[test]
fn test_generate_fails_on_cycle() {
    let tmp = temp_dir();
    write_solution(
        tmp.path(),
        r#"
name = "Loop"

[[projects]]
name = "a"
kind = "native-static-library"
folder = "a"
requires = ["b"]

[[projects]]
name = "b"
kind = "native-static-library"
folder = "b"
requires = ["a"]
"#,
    );

    bffgen()
        .arg("generate")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("cyclic dependency"))
        .stderr(predicate::str::contains("a -> b -> a"));

    assert!(!tmp.path().join("Loop.bff").exists());
}

#[test]
fn test_generate_reports_skipped_project() {
    let tmp = temp_dir();
    write_solution(
        tmp.path(),
        r#"
name = "Partial"

[[projects]]
name = "good"
kind = "native-executable"
folder = "good"

[[projects]]
name = "broken"
folder = "broken"
"#,
    );

    bffgen()
        .args(["--no-color", "generate"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("skipped project `broken`"));

    let solution = fs::read_to_string(tmp.path().join("Partial.bff")).unwrap();
    assert!(solution.contains("Alias('All') { .Targets = { 'good' } }"));
}

#[test]
fn test_generate_without_solution_fails() {
    let tmp = temp_dir();

    bffgen()
        .args(["generate", "--solution", "missing/Solution.toml"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

// ============================================================================
// bffgen order
// ============================================================================

#[test]
fn test_order_prints_build_order() {
    let tmp = temp_dir();
    write_solution(tmp.path(), GAME);

    let output = bffgen().arg("order").current_dir(tmp.path()).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let core = stdout.find("core").unwrap();
    let engine = stdout.find("engine").unwrap();
    let app = stdout.find("app").unwrap();
    assert!(core < engine && engine < app);
}

#[test]
fn test_order_json() {
    let tmp = temp_dir();
    write_solution(tmp.path(), GAME);

    let output = bffgen()
        .args(["order", "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = json["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0]["name"], "core");
}

// ============================================================================
// bffgen completions
// ============================================================================

#[test]
fn test_completions_bash() {
    bffgen()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bffgen"));
}

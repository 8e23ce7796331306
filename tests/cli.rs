//! CLI integration tests for parquet_release.
//!
//! Each test lays out a throwaway plugin project and points the build tool
//! at a stand-in through `release.toml`.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the parquet_release binary command, rooted at `project`.
fn parquet_release(project: &Path) -> Command {
    let mut cmd = Command::cargo_bin("parquet_release").unwrap();
    cmd.arg("--project-dir")
        .arg(project)
        .env("RUST_LOG", "info")
        .env_remove("PARQUET_RELEASE_CONFIG");
    cmd
}

/// Writes the plugin sources and a `release.toml` using `build_tool`.
fn project(root: &Path, build_tool: &str) {
    for (path, contents) in [
        ("src/ado/parquet.ado", "*! version 2.0.1 10Oct2026\nprogram parquet\n"),
        ("docs/parquet.sthlp", "help"),
        ("changelog.md", "# changes"),
        ("src/parquet.pkg", "v 3"),
        ("src/stata.toc", "v 3"),
        ("src/test/parquet_tests.do", "parquet use test"),
    ] {
        let p = root.join(path);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(p, contents).unwrap();
    }
    fs::write(
        root.join("release.toml"),
        format!("[build_tool]\nprogram = \"{build_tool}\"\n"),
    )
    .unwrap();
}

/// A stand-in build tool that drops the unix plugin into the fallback
/// directory.
fn fake_make(root: &Path) -> String {
    let tool = root.join("fake-make");
    fs::write(
        &tool,
        "#!/bin/sh\nmkdir -p lib/plugin && echo elf > lib/plugin/parquet_unix.plugin\n",
    )
    .unwrap();
    fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();
    tool.display().to_string()
}

fn zip_names(path: &Path) -> Vec<String> {
    let mut archive = zip::ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

#[test]
fn help_lists_flags() {
    Command::cargo_bin("parquet_release")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--make-flags").and(predicate::str::contains("--windows")));
}

#[test]
fn clean_on_an_empty_project_succeeds() {
    let tmp = TempDir::new().unwrap();
    project(tmp.path(), "true");

    parquet_release(tmp.path())
        .arg("--clean")
        .assert()
        .code(0)
        .stderr(predicate::str::contains("parquet.ado not found"));
}

#[test]
fn failing_build_tool_exits_with_compiler_code() {
    let tmp = TempDir::new().unwrap();
    project(tmp.path(), "false");

    parquet_release(tmp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to build plugins"));
    assert!(!tmp.path().join("releases/parquet-latest.zip").exists());
}

#[test]
fn build_without_binaries_is_an_anomaly() {
    let tmp = TempDir::new().unwrap();
    project(tmp.path(), "true");

    parquet_release(tmp.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Could not find any plugin"));
    assert!(!tmp.path().join("releases/parquet-latest.zip").exists());
    assert!(!tmp.path().join("releases/parquet-ssc.zip").exists());
}

#[test]
fn fallback_binary_lands_in_both_archives() {
    let tmp = TempDir::new().unwrap();
    let tool = fake_make(tmp.path());
    project(tmp.path(), &tool);

    parquet_release(tmp.path())
        .assert()
        .success()
        .stderr(
            predicate::str::contains("Could not find 'parquet_windows.plugin'")
                .and(predicate::str::contains("Could not find 'parquet_macosx.plugin'"))
                .and(predicate::str::contains("Packaging without: windows, macosx")),
        );

    let release = zip_names(&tmp.path().join("releases/parquet-latest.zip"));
    assert!(release.contains(&"parquet/parquet_unix.plugin".to_string()));
    assert!(release.contains(&"parquet/parquet.ado".to_string()));

    let repository = zip_names(&tmp.path().join("releases/parquet-ssc.zip"));
    assert_eq!(
        repository,
        ["parquet.ado", "parquet.sthlp", "parquet_unix.plugin"]
    );
    assert!(tmp.path().join("build/parquet_tests.do").is_file());
}

#[test]
fn missing_interpreter_exits_with_its_own_code() {
    let tmp = TempDir::new().unwrap();
    let tool = fake_make(tmp.path());
    project(tmp.path(), &tool);

    parquet_release(tmp.path())
        .args(["--replace", "--stata"])
        .arg(tmp.path().join("no/such/stata"))
        .assert()
        .code(4);
}

#[test]
fn clean_wins_over_build_flags() {
    let tmp = TempDir::new().unwrap();
    project(tmp.path(), "true");
    fs::create_dir_all(tmp.path().join("build/parquet")).unwrap();
    fs::write(tmp.path().join("build/parquet.ado"), "ado").unwrap();
    fs::write(tmp.path().join("build/parquet/changelog.md"), "log").unwrap();

    parquet_release(tmp.path())
        .args(["--clean", "--test", "--replace", "--windows"])
        .assert()
        .code(0)
        .stderr(predicate::str::contains("parquet.ado"));

    assert!(!tmp.path().join("build/parquet.ado").exists());
    assert!(!tmp.path().join("build/parquet/changelog.md").exists());
    assert!(!tmp.path().join("releases/parquet-latest.zip").exists());
}

#[test]
fn relative_stata_path_is_read_from_the_invocation_dir() {
    let tmp = TempDir::new().unwrap();
    let caller = tmp.path().join("caller");
    let repo = tmp.path().join("repo");
    fs::create_dir_all(&caller).unwrap();
    fs::create_dir_all(&repo).unwrap();
    let tool = fake_make(&repo);
    project(&repo, &tool);

    let stata = caller.join("stata");
    fs::write(&stata, "#!/bin/sh
exit 0
").unwrap();
    fs::set_permissions(&stata, fs::Permissions::from_mode(0o755)).unwrap();

    parquet_release(Path::new("../repo"))
        .current_dir(&caller)
        .args(["--replace", "--stata", "./stata"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Replaced parquet"));
}

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::predicate;
use tempfile::TempDir;

const WRONG_ARGS: &str = "Wrong number of args, must be 2\n";

fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("failed to write test file");
    path.to_str().expect("temp path is not utf-8").to_string()
}

/// Test the first line and the following window are printed
#[test]
fn test_prints_two_lines() {
    let dir = TempDir::new().expect("failed to create temp directory");
    let path = write_file(&dir, "two.txt", b"hello\nworld");

    cargo_bin_cmd!("headline")
        .arg(&path)
        .assert()
        .success()
        .stdout("hello\nworld\n");
}

/// Test running without a path fails with the arity message
#[test]
fn test_no_args() {
    cargo_bin_cmd!("headline")
        .assert()
        .code(1)
        .stdout(WRONG_ARGS);
}

/// Test running with more than one path fails with the arity message
#[test]
fn test_too_many_args() {
    cargo_bin_cmd!("headline")
        .args(["a.txt", "b.txt"])
        .assert()
        .code(1)
        .stdout(WRONG_ARGS);
}

/// Test a missing file is reported instead of printing garbage
#[test]
fn test_missing_file() {
    let dir = TempDir::new().expect("failed to create temp directory");
    let path = dir.path().join("missing.txt");

    cargo_bin_cmd!("headline")
        .arg(&path)
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("failed to open"))
        .stderr(predicate::str::contains("missing.txt"));
}

/// Test a first line longer than one window is printed whole
#[test]
fn test_long_first_line() {
    let dir = TempDir::new().expect("failed to create temp directory");
    let long = "x".repeat(600);
    let path = write_file(&dir, "long.txt", format!("{long}\nsecond").as_bytes());

    cargo_bin_cmd!("headline")
        .arg(&path)
        .assert()
        .success()
        .stdout(format!("{long}\nsecond\n"));
}

/// Test a directory cannot be read as a file
#[cfg(unix)]
#[test]
fn test_directory() {
    let dir = TempDir::new().expect("failed to create temp directory");

    cargo_bin_cmd!("headline")
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("error:"));
}

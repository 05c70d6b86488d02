use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::{PredicateBooleanExt, predicate};
use tempfile::TempDir;

fn write_source(dir: &TempDir, content: &str) -> String {
    let path = dir.path().join("Test.lang");
    fs::write(&path, content).expect("failed to write source file");
    path.to_str().expect("temp path is not utf-8").to_string()
}

/// Test a class is printed back as source
#[test]
fn test_prints_class() {
    let dir = TempDir::new().expect("failed to create temp directory");
    let path = write_source(
        &dir,
        "public class Counter extends Base {\n    mut i32 count = 0;\n    void func bump() {\n        count++;\n    }\n}\n",
    );

    cargo_bin_cmd!("parse")
        .args(["-q", &path])
        .assert()
        .success()
        .stdout(
            "public class Counter extends Base {\n\
             mut i32 count = 0;\n\
             void func bump() {\n\
             count++;\n\
             }\n\
             }\n",
        );
}

/// Test a syntax error names the file and what was expected
#[test]
fn test_syntax_error() {
    let dir = TempDir::new().expect("failed to create temp directory");
    let path = write_source(&dir, "class A { i32 x }");

    cargo_bin_cmd!("parse")
        .arg(&path)
        .assert()
        .failure()
        .stdout(
            predicate::str::contains("Test.lang")
                .and(predicate::str::contains("expected ';' after the variable declaration")),
        );
}

/// Test a tokenizer error is reported through the parser
#[test]
fn test_token_error() {
    let dir = TempDir::new().expect("failed to create temp directory");
    let path = write_source(&dir, "class A {\n    i32 x = 0z0;\n}");

    cargo_bin_cmd!("parse")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("line 2, column 13"));
}

/// Test a missing file is reported
#[test]
fn test_missing_file() {
    cargo_bin_cmd!("parse")
        .arg("does-not-exist.lang")
        .assert()
        .failure()
        .stdout(
            predicate::str::contains("failed to read source file")
                .and(predicate::str::contains("does-not-exist.lang")),
        );
}

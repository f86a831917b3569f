//! Integration tests for the minic CLI.
//!
//! These tests invoke the `minic` binary as a subprocess and check exit
//! codes, stdout, and stderr.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(deprecated)]
fn minic() -> Command {
    Command::cargo_bin("minic").unwrap()
}

/// Write a listing into a temp dir and return its path.
fn listing(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("test.smc");
    fs::write(&path, content).unwrap();
    path
}

const ELEVEN: &str = "\
JUMP(\"main\");
main
PUSH(0);
PUSH(2);
STORE();
PUSH(3);
PUSH(4);
PUSH(2);
MUL();
ADD();
INT();
PUSH(2);
STORE();
LOAD(2);
PRINT();
RET();
END();
";

// ---- No-args / help ----

#[test]
fn no_args_prints_usage_and_exits_1() {
    minic()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage: minic"));
}

#[test]
fn help_flag_exits_0() {
    minic()
        .arg("--help")
        .assert()
        .success()
        .stderr(predicate::str::contains("Commands:"));
}

#[test]
fn unknown_command_exits_1() {
    minic()
        .arg("frobnicate")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown command"));
}

// ---- Run ----

#[test]
fn run_executes_a_listing() {
    let dir = TempDir::new().unwrap();
    let path = listing(&dir, ELEVEN);

    minic()
        .args(["run", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout("11\n");
}

#[test]
fn run_feeds_stdin_to_read() {
    let dir = TempDir::new().unwrap();
    let path = listing(&dir, "READ();\nREAD();\nADD();\nPRINT();\nEND();\n");

    minic()
        .args(["run", path.to_str().unwrap()])
        .write_stdin("3 4\n")
        .assert()
        .success()
        .stdout("7\n");
}

#[test]
fn run_missing_file_exits_1() {
    minic()
        .args(["run", "/nonexistent/file.smc"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn run_parse_error_exits_1() {
    let dir = TempDir::new().unwrap();
    let path = listing(&dir, "FROB();\n");

    minic()
        .args(["run", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown opcode"));
}

#[test]
fn run_unresolved_label_exits_2() {
    let dir = TempDir::new().unwrap();
    let path = listing(&dir, "JUMP(\"nowhere\");\nEND();\n");

    minic()
        .args(["run", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("unresolved label"));
}

#[test]
fn run_runtime_error_exits_3() {
    let dir = TempDir::new().unwrap();
    let path = listing(&dir, "PUSH(1);\nPUSH(0);\nDIV();\nEND();\n");

    minic()
        .args(["run", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("division by zero"));
}

#[test]
fn run_trace_writes_to_stderr_only() {
    let dir = TempDir::new().unwrap();
    let path = listing(&dir, "PUSH(5);\nPRINT();\nEND();\n");

    minic()
        .args(["run", path.to_str().unwrap(), "--trace"])
        .assert()
        .success()
        .stdout("5\n")
        .stderr(predicate::str::contains("PUSH"));
}

// ---- Check ----

#[test]
fn check_reports_ok() {
    let dir = TempDir::new().unwrap();
    let path = listing(&dir, ELEVEN);

    minic()
        .args(["check", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK:"));
}

#[test]
fn check_catches_duplicate_labels() {
    let dir = TempDir::new().unwrap();
    let path = listing(&dir, "main\nmain\nEND();\n");

    minic()
        .args(["check", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("duplicate label"));
}

#[test]
fn check_catches_unresolved_labels_on_untaken_branches() {
    let dir = TempDir::new().unwrap();
    let path = listing(&dir, "PUSH(1);\nBRZ(\"missing\");\nEND();\n");

    minic()
        .args(["check", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("unresolved label"));
}

// ---- Format ----

#[test]
fn format_canonicalizes_spacing() {
    let dir = TempDir::new().unwrap();
    let path = listing(&dir, "  PUSH ( 3 ) ; push three\nADD () ;\nEND();\n");

    minic()
        .args(["format", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout("PUSH(3);\nADD();\nEND();\n");
}

#[test]
fn format_parse_error_exits_1() {
    let dir = TempDir::new().unwrap();
    let path = listing(&dir, "PUSH(oops);\n");

    minic()
        .args(["format", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid number"));
}

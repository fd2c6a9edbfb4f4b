//! End-to-end tests for the built-in commands.
//!
//! Command outcomes are logged, so assertions look at stderr.

mod common;
use common::prelude::*;

#[test]
fn test_command_a() {
    skeleton()
        .args(["command-a", "--option", "foo"])
        .assert()
        .success()
        .stderr(predicate::str::contains("INFO"))
        .stderr(predicate::str::contains(
            "Command A executed with option: foo",
        ));
}

#[test]
fn test_command_b_with_and_without_flag() {
    skeleton()
        .args(["command-b", "--flag"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Command B executed with flag: true"));

    skeleton()
        .arg("command-b")
        .assert()
        .success()
        .stderr(predicate::str::contains("Command B executed with flag: false"));
}

#[test]
fn test_command_c_list() {
    skeleton()
        .args(["command-c", "--list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Items listed"));
}

#[test]
fn test_command_c_add() {
    skeleton()
        .args(["command-c", "--add", "item1", "item2"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            r#"Items added: ["item1", "item2"]"#,
        ));
}

#[test]
fn test_command_c_remove() {
    skeleton()
        .args(["command-c", "--remove", "old"])
        .assert()
        .success()
        .stderr(predicate::str::contains(r#"Items removed: ["old"]"#));
}

#[test]
fn test_command_d() {
    skeleton()
        .args(["command-d", "--name", "ada"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Command D executed with name: ada"));
}

#[test]
fn test_log_level_filters_outcome_line() {
    skeleton()
        .args(["--log-level", "error", "command-a", "--option", "foo"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Command A executed").not());
}

#[test]
fn test_global_option_after_command() {
    skeleton()
        .args(["command-b", "--log-level", "error"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_log_env_adds_directives() {
    skeleton()
        .env("SKELETON_CLI_LOG", "error")
        .args(["command-d", "--name", "ada"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Command D executed").not());
}

#[test]
fn test_repeated_runs_are_identical() {
    // Log lines without their leading timestamp
    let run = || {
        let output = skeleton()
            .args(["command-c", "--add", "a"])
            .output()
            .expect("Failed to execute command");
        let lines: Vec<String> = String::from_utf8_lossy(&output.stderr)
            .lines()
            .map(|line| line.split_once(" - ").map_or(line, |(_, rest)| rest).to_string())
            .collect();
        (output.status.code(), output.stdout, lines)
    };
    let first = run();
    let second = run();
    assert_eq!(first.0, Some(0));
    assert_eq!(
        first.2,
        vec![
            r#"INFO - Adding items: ["a"]"#.to_string(),
            r#"INFO - Items added: ["a"]"#.to_string(),
        ]
    );
    assert_eq!(first, second);
}

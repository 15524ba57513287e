//! Integration tests for top-level CLI behavior.
#![cfg(unix)]

use std::process::Command;

fn run_cmdrelay(args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_cmdrelay");
    Command::new(bin)
        .args(args)
        .env_remove("CMDRELAY_RECORD")
        .output()
        .expect("failed to run cmdrelay binary")
}

#[test]
fn run_echoes_command_and_relays_stdout() {
    let output = run_cmdrelay(&["run", "echo", "hello"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("echo"));
    assert!(stdout.contains("[hello]"));
    assert!(stdout.ends_with("hello\n"), "captured text must not be printed twice: {stdout:?}");
}

#[test]
fn run_relays_stderr() {
    let output = run_cmdrelay(&["run", "sh", "-c", "echo oops >&2"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success());
    assert!(stderr.contains("oops"));
}

#[test]
fn silent_prints_nothing() {
    let output = run_cmdrelay(&["silent", "sh", "-c", "echo out; echo err >&2"]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
}

#[test]
fn env_flag_reaches_the_child() {
    let output = run_cmdrelay(&["run", "-e", "FOO=bar", "printenv", "FOO"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.ends_with("bar\n"));
}

#[test]
fn child_exit_code_is_forwarded() {
    let output = run_cmdrelay(&["silent", "sh", "-c", "exit 7"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(7));
    assert!(stderr.contains("exited with status 7"));
}

#[test]
fn signal_killed_child_exits_with_one() {
    let output = run_cmdrelay(&["silent", "sh", "-c", "kill -9 $$"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("was terminated by a signal"), "stderr: {stderr:?}");
}

#[test]
fn bare_env_name_is_a_usage_error() {
    let output = run_cmdrelay(&["run", "-e", "PATH", "printenv", "PATH"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("invalid environment entry"), "stderr: {stderr:?}");
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_program_reports_start_failure() {
    let output = run_cmdrelay(&["silent", "cmdrelay-definitely-missing"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("failed to start"));
}

#[test]
fn help_goes_to_stdout_and_succeeds() {
    let output = run_cmdrelay(&["run", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("--env"));
    assert!(stdout.contains("--env-file"));
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let output = run_cmdrelay(&["nonsense"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}

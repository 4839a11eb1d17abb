#![cfg(unix)]

use std::process::Command;

use runlog_test_utils::sinks::read_log_file;
use tempfile::tempdir;

fn runlog() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_runlog"));
    cmd.env("RUNLOG_LOG", "error");
    cmd
}

#[test]
fn dry_run_prints_tokens_without_creating_the_log() {
    let work = tempdir().unwrap();
    let log = work.path().join("never.log");

    let output = runlog()
        .arg("--dry-run")
        .arg(work.path())
        .arg(&log)
        .arg(r#"grep -r "two words" ."#)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("executable: grep"));
    assert!(stdout.contains("\"two words\""));
    assert!(!log.exists());
}

#[test]
fn child_exit_code_is_passed_through() {
    let work = tempdir().unwrap();
    let log = work.path().join("exit.log");

    let status = runlog()
        .arg(work.path())
        .arg(&log)
        .arg("sh -c 'echo done; exit 7'")
        .status()
        .unwrap();

    assert_eq!(status.code(), Some(7));
    assert_eq!(read_log_file(&log)[0].message, "done");
}

#[test]
fn bad_command_fails_before_anything_is_created() {
    let work = tempdir().unwrap();
    let log = work.path().join("bad.log");

    let output = runlog()
        .arg(work.path())
        .arg(&log)
        .arg("echo 'unterminated")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unclosed quote in command line: echo 'unterminated"));
    assert!(!log.exists());
}

#[test]
fn missing_arguments_are_reported() {
    let output = runlog().arg("/tmp").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("a directory, log file and command is required"));
}

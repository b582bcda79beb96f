//! End-to-end tests for the `unitrun` binary.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::{Command, Output};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tempfile::TempDir;

/// Serializes script creation and spawning (see `invoker_tests.rs` in unitrun-runtime).
static PROCESS_LOCK: Mutex<()> = Mutex::new(());

fn lock() -> MutexGuard<'static, ()> {
    PROCESS_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

fn write_script(path: &Path, body: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

fn unitrun(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_unitrun"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("UNITRUN_BUILD_DIR")
        .env_remove("UNITRUN_CMAKE_DIR")
        .env_remove("UNITRUN_APP_PATH")
        .env_remove("UNITRUN_PATTERNS")
        .output()
        .unwrap()
}

#[test]
fn test_run_success_streams_output() {
    let _guard = lock();
    let dir = TempDir::new().unwrap();
    write_script(&dir.path().join("cmake/bin/Tests"), "echo hello-from-tests");

    let output = unitrun(&["run", "--build-dir", dir.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("hello-from-tests"));
}

#[test]
fn test_run_failure_passes_exit_status_through() {
    let _guard = lock();
    let dir = TempDir::new().unwrap();
    write_script(&dir.path().join("cmake/Tests"), "echo failing\nexit 7");

    let output = unitrun(&["run", "--build-dir", dir.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(7));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failing"));
    assert!(stderr.contains("exit status 7"));
}

#[test]
fn test_run_without_directories_is_configuration_error() {
    let output = unitrun(&["run"]);
    assert_eq!(output.status.code(), Some(78));
}

#[test]
fn test_resolve_missing_app_is_not_found() {
    let dir = TempDir::new().unwrap();
    let output = unitrun(&["resolve", "--cmake-dir", dir.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(66));
}

#[test]
fn test_resolve_json_describes_invocation() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub/App"), b"bin").unwrap();

    let output = unitrun(&[
        "resolve",
        "--cmake-dir",
        dir.path().to_str().unwrap(),
        "--app-path",
        "sub/App",
        "--no-reports",
        "-p",
        "Foo::*",
        "--json",
    ]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"file_name\": \"App\""));
    assert!(stdout.contains("Foo::*"));
    assert!(!stdout.contains("\"-r\""));
}

#[test]
fn test_verbose_resolve_json_keeps_stdout_parseable() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("bin")).unwrap();
    fs::write(dir.path().join("bin/Tests"), b"bin").unwrap();

    let output = unitrun(&[
        "--verbose",
        "resolve",
        "--cmake-dir",
        dir.path().to_str().unwrap(),
        "--json",
    ]);

    assert_eq!(output.status.code(), Some(0));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["app"]["file_name"], "Tests");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Resolving test application"));
}

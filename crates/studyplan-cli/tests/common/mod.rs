//! Common utilities for CLI E2E tests.

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// A scratch data directory passed to every invocation via `--data-dir`.
pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_file(&self) -> PathBuf {
        self.path().join("subjects.json")
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_studyplan"));
        cmd.arg("--data-dir")
            .arg(self.path())
            .args(args)
            .env_remove("RUST_LOG");
        cmd
    }

    /// Invoke a CLI command and return the output.
    pub fn run(&self, args: &[&str]) -> (String, String, i32) {
        let output = self
            .command(args)
            .output()
            .expect("Failed to execute CLI command");
        split(output)
    }

    /// Invoke a CLI command and expect success.
    pub fn run_success(&self, args: &[&str]) -> String {
        let (stdout, stderr, code) = self.run(args);
        assert_eq!(
            code, 0,
            "CLI command failed with code {code}: {args:?}\nstderr: {stderr}"
        );
        stdout
    }

    /// Invoke a CLI command and expect failure.
    pub fn run_failure(&self, args: &[&str]) -> (String, String, i32) {
        let (stdout, stderr, code) = self.run(args);
        assert!(code != 0, "CLI command unexpectedly succeeded: {args:?}");
        (stdout, stderr, code)
    }

    /// Run `studyplan shell` feeding `input` on stdin.
    pub fn run_shell(&self, input: &str) -> (String, String, i32) {
        let mut child = self
            .command(&["shell"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn shell");
        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(input.as_bytes())
            .expect("Failed to write shell input");
        split(child.wait_with_output().expect("Failed to wait for shell"))
    }

    /// Add a subject with its exam date.
    pub fn add_subject(&self, name: &str, exam_date: &str, difficulty: u8) {
        self.run_success(&[
            "subject",
            "add",
            name,
            "--exam-date",
            exam_date,
            "--difficulty",
            &difficulty.to_string(),
        ]);
    }

    /// Add a topic to an existing subject.
    pub fn add_topic(&self, subject: &str, name: &str, priority: u8, hours: f64) {
        self.run_success(&[
            "topic",
            "add",
            subject,
            name,
            "--priority",
            &priority.to_string(),
            "--hours",
            &hours.to_string(),
        ]);
    }
}

fn split(output: Output) -> (String, String, i32) {
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);
    (stdout, stderr, code)
}

/// Parse JSON output from CLI.
pub fn parse_json(json: &str) -> serde_json::Value {
    serde_json::from_str(json).expect("Failed to parse JSON output")
}

/// Check if string contains substring
pub fn assert_contains(haystack: &str, needle: &str) {
    assert!(
        haystack.contains(needle),
        "Expected '{haystack}' to contain '{needle}'"
    );
}

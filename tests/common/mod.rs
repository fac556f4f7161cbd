//! Shared integration-test harness for running the `fencecall` binary as a
//! child process.

#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

/// Helpers for invoking the compiled `fencecall` binary.
pub struct FenceCallProcess;

impl FenceCallProcess {
    fn command(args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_fencecall"));
        cmd.args(args)
            .env_remove("FENCECALL_LOG_LEVEL")
            .env_remove("FENCECALL_EVENTS")
            .env("NO_COLOR", "1");
        cmd
    }

    /// Runs a one-shot command and collects its output.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_command(args: &[&str]) -> Output {
        Self::command(args)
            .stdin(Stdio::null())
            .output()
            .expect("failed to run fencecall")
    }

    /// Runs a command with `input` piped to stdin.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn_with_stdin(args: &[&str], input: &str) -> Output {
        let mut child = Self::command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to spawn fencecall");

        child
            .stdin
            .take()
            .expect("stdin not captured")
            .write_all(input.as_bytes())
            .expect("failed to write stdin");

        child.wait_with_output().expect("failed to wait for fencecall")
    }

    /// Returns the path of a file under `tests/fixtures`.
    pub fn fixture_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }
}

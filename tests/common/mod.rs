//! Common test utilities for migstat integration tests
//!
//! Provides a helper to invoke the compiled binary against a mock API
//! server and capture its output.

#![allow(dead_code)]

/// ANSI escape sequence prefix
pub const COLOR: &str = "\x1b[";

/// Result of invoking the migstat binary
#[derive(Debug)]
pub struct CmdResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CmdResult {
    /// Shorthand for stdout containment checks
    pub fn contains(&self, needle: &str) -> bool {
        self.stdout.contains(needle)
    }
}

/// Run migstat with the given arguments against an API base URL.
pub fn migstat(api_base: &str, args: &[&str]) -> CmdResult {
    let output = assert_cmd::Command::cargo_bin("migstat")
        .expect("binary should be built")
        .env("MIGSTAT_API_BASE", api_base)
        .env_remove("NO_COLOR")
        .args(args)
        .output()
        .expect("binary should run");

    CmdResult {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code: output.status.code().unwrap_or(-1),
    }
}

/// A base URL that should never be resolved; argument-error tests must fail
/// before any request is made.
pub const DUMMY_API: &str = "http://this-should.never-resolve";

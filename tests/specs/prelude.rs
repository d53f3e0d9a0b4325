// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for CLI specs: a throwaway spool plus a small
//! wrapper around `assert_cmd` invocations of the `maintq` binary.

use std::path::Path;
use std::process::Output;

use tempfile::TempDir;

/// A throwaway spool directory, one per test.
pub struct Spool {
    temp: TempDir,
}

impl Spool {
    pub fn empty() -> Self {
        Self { temp: tempfile::tempdir().unwrap() }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// A `maintq` invocation pointed at this spool.
    pub fn maintq(&self) -> Maintq {
        let mut invocation = maintq();
        invocation.cmd.arg("--spool").arg(self.temp.path());
        invocation
    }
}

/// A bare `maintq` invocation with a scrubbed environment.
pub fn maintq() -> Maintq {
    let mut cmd = assert_cmd::Command::cargo_bin("maintq").unwrap();
    cmd.env_remove("MAINTQ_DIRECTORY_URL");
    cmd.env_remove("MAINTQ_LOG");
    Maintq { cmd }
}

pub struct Maintq {
    cmd: assert_cmd::Command,
}

impl Maintq {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn passes(mut self) -> Checked {
        let output = self.cmd.output().unwrap();
        assert!(
            output.status.success(),
            "expected success, got {:?}\nstderr: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr),
        );
        Checked { output }
    }

    pub fn fails(mut self) -> Checked {
        let output = self.cmd.output().unwrap();
        assert!(
            !output.status.success(),
            "expected failure, got success\nstdout: {}",
            String::from_utf8_lossy(&output.stdout),
        );
        Checked { output }
    }
}

pub struct Checked {
    output: Output,
}

impl Checked {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(
            self.stdout().contains(needle),
            "stdout missing {needle:?}:\n{}",
            self.stdout(),
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let stderr = String::from_utf8_lossy(&self.output.stderr).into_owned();
        assert!(stderr.contains(needle), "stderr missing {needle:?}:\n{stderr}");
        self
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-run execution protocol for a request.
//!
//! Scripts run via `sh -c` with the request directory as working
//! directory, so ad hoc scripts can drop files there. No timeout is
//! imposed: a hung script blocks the whole scheduler until it exits.
//! That is a documented limitation, not silently handled.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::error::RequestError;
use crate::request::Request;
use crate::timestamp;

/// Exit code meaning "try again later" (EX_TEMPFAIL from sysexits).
pub const EXIT_TEMPFAIL: i32 = 75;

/// Maximum execution attempts before a tempfailing request becomes
/// RETRYLIMIT. 48 matches one attempt per 30 minutes over 24 hours in
/// the reference deployment.
pub const MAX_ATTEMPTS: u32 = 48;

fn append(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = OpenOptions::new().append(true).create(true).open(path)?;
    file.write_all(bytes)
}

fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    append(path, format!("{line}\n").as_bytes())
}

impl Request {
    /// Mark execution as started.
    ///
    /// Write-once: re-invoking execution on a request that crashed
    /// mid-run must not overwrite the original start time.
    pub fn start(&self, clock: &impl Clock) -> Result<(), RequestError> {
        let marker = self.dir()?.join("started");
        if !marker.exists() {
            std::fs::write(marker, format!("{}\n", timestamp::format(clock.now())))?;
        }
        Ok(())
    }

    /// Mark execution as stopped. Rewritten on every attempt.
    pub fn stop(&self, clock: &impl Clock) -> Result<(), RequestError> {
        let marker = self.dir()?.join("stopped");
        std::fs::write(marker, format!("{}\n", timestamp::format(clock.now())))?;
        Ok(())
    }

    /// Increment the attempt counter, returning the new value.
    pub fn incr_attempt(&self) -> Result<u32, RequestError> {
        let next = self.attempt().unwrap_or(0) + 1;
        let mut file = File::create(self.dir()?.join("attempt"))?;
        writeln!(file, "{next}")?;
        Ok(next)
    }

    /// Run a shell command in this request's directory, appending its
    /// output to the `stdout`/`stderr` artifacts, and return the exit
    /// code. A command killed by a signal reports -1.
    pub fn spawn(&self, command: &str) -> Result<i32, RequestError> {
        let dir = self.dir()?;
        debug!(request = %self.short_id(), command, "running");
        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .current_dir(dir)
            .stdin(Stdio::null())
            .output()?;
        append(&dir.join("stdout"), &output.stdout)?;
        append(&dir.join("stderr"), &output.stderr)?;
        let exit_code = output.status.code().unwrap_or(-1);
        debug!(request = %self.short_id(), exit_code, "finished");
        Ok(exit_code)
    }

    /// Run the applicability check, if any, recording its exit code.
    ///
    /// Returns true when no check is configured or the check exits
    /// zero; false marks the request as not needed rather than failed.
    pub fn is_applicable(&self) -> Result<bool, RequestError> {
        let Some(check) = self.applicable.clone() else {
            return Ok(true);
        };
        debug!(request = %self.short_id(), "testing applicability");
        let exit_code = self.spawn(&check)?;
        append_line(&self.dir()?.join("applicable"), &exit_code.to_string())?;
        if exit_code != 0 {
            info!(request = %self.short_id(), "not applicable, skipping script");
            return Ok(false);
        }
        Ok(true)
    }

    /// Run one execution attempt.
    ///
    /// In order: start marker (write-once), attempt counter,
    /// applicability check, script, exit code artifact, stop marker.
    /// Errors never escape; every outcome is expressed through the
    /// derived state afterwards. A failure partway through leaves the
    /// request RUNNING, and the next invocation re-runs it from the
    /// top (at-least-once execution per attempt).
    pub fn execute(&self, clock: &impl Clock) {
        info!(request = %self.short_id(), "starting execution");
        if let Err(error) = self.execute_inner(clock) {
            warn!(request = %self.short_id(), %error, "execution attempt did not complete");
        }
    }

    fn execute_inner(&self, clock: &impl Clock) -> Result<(), RequestError> {
        self.start(clock)?;
        self.incr_attempt()?;
        let exit_code = match &self.script {
            Some(script) if self.is_applicable()? => self.spawn(script)?,
            // Skipped or script-less requests count as trivially
            // successful.
            _ => 0,
        };
        append_line(&self.dir()?.join("exitcode"), &exit_code.to_string())?;
        if exit_code != 0 {
            warn!(request = %self.short_id(), exit_code, "script failed");
        }
        self.stop(clock)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

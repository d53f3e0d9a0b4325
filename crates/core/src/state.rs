// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Processing state derived from the request directory.
//!
//! State is never stored: it is a pure function of which marker files
//! exist (and what they contain) at the moment of the query. External
//! processes and prior crashed attempts can change the markers between
//! calls, so the derivation is recomputed every time.

use chrono::{DateTime, Utc};
use std::fmt;
use std::path::Path;
use tracing::warn;

use crate::request::Request;
use crate::run::{EXIT_TEMPFAIL, MAX_ATTEMPTS};
use crate::timestamp;

/// Where a request is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    /// Not scheduled yet, or scheduled in the future.
    Pending,
    /// Scheduled start time has passed; ready for execution.
    Due,
    /// Started but not yet stopped.
    Running,
    Success,
    /// Exit code 75 within the attempt limit; run again next cycle.
    Tempfail,
    /// Exit code 75 once too often. Still reported as a failure.
    Retrylimit,
    Error,
    /// Request directory or its data record is gone.
    Deleted,
}

impl RequestState {
    /// Terminal with respect to the local scheduler: picked up once
    /// more by archival, then out of the live set permanently.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RequestState::Success
                | RequestState::Error
                | RequestState::Retrylimit
                | RequestState::Deleted
        )
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RequestState::Pending => "pending",
            RequestState::Due => "due",
            RequestState::Running => "running",
            RequestState::Success => "success",
            RequestState::Tempfail => "tempfail",
            RequestState::Retrylimit => "too many retries",
            RequestState::Error => "error",
            RequestState::Deleted => "deleted",
        };
        f.write_str(label)
    }
}

fn read_marker_timestamp(path: &Path) -> Option<DateTime<Utc>> {
    let text = std::fs::read_to_string(path).ok()?;
    let line = text.lines().next()?;
    match timestamp::parse(line) {
        Ok(time) => Some(time),
        Err(error) => {
            warn!(path = %path.display(), %error, "unreadable marker timestamp");
            None
        }
    }
}

impl Request {
    /// Execution start time, or `None` if the marker is absent or
    /// unreadable.
    pub fn started(&self) -> Option<DateTime<Utc>> {
        read_marker_timestamp(&self.dir().ok()?.join("started"))
    }

    /// Execution stop time, or `None` if the marker is absent or
    /// unreadable.
    pub fn stopped(&self) -> Option<DateTime<Utc>> {
        read_marker_timestamp(&self.dir().ok()?.join("stopped"))
    }

    /// Script exit code from the last line of the append-only
    /// `exitcode` artifact. An empty or unparsable file means no exit
    /// code has been recorded.
    pub fn exit_code(&self) -> Option<i32> {
        let text = std::fs::read_to_string(self.dir().ok()?.join("exitcode")).ok()?;
        text.lines().last()?.trim().parse().ok()
    }

    /// Execution attempt counter, or `None` if never attempted.
    pub fn attempt(&self) -> Option<u32> {
        let text = std::fs::read_to_string(self.dir().ok()?.join("attempt")).ok()?;
        text.lines().next()?.trim().parse().ok()
    }

    /// Wall-clock execution duration in seconds, if both markers exist.
    pub fn execution_time(&self) -> Option<i64> {
        Some((self.stopped()? - self.started()?).num_seconds())
    }

    /// Current processing state, derived from the request directory.
    pub fn state(&self, now: DateTime<Utc>) -> RequestState {
        let Ok(dir) = self.dir() else {
            return RequestState::Deleted;
        };
        if !dir.join("data").is_file() {
            return RequestState::Deleted;
        }
        // Presence of the markers decides the state, not their
        // content: a corrupt timestamp must not demote a finished
        // request back to Pending and re-run it forever.
        if !dir.join("started").is_file() {
            return match self.starttime {
                Some(start) if now >= start => RequestState::Due,
                _ => RequestState::Pending,
            };
        }
        if !dir.join("stopped").is_file() {
            return RequestState::Running;
        }
        match self.exit_code() {
            // No exit code recorded counts as success.
            None | Some(0) => RequestState::Success,
            Some(EXIT_TEMPFAIL) => {
                if self.attempt().unwrap_or(0) > MAX_ATTEMPTS {
                    RequestState::Retrylimit
                } else {
                    RequestState::Tempfail
                }
            }
            Some(_) => RequestState::Error,
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;

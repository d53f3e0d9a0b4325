// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A single maintenance request and its durable data record.
//!
//! Each request owns a directory in the spool. The `data` file inside
//! it is the primary record (this type's serde form); everything else
//! in the directory is an execution marker written by [`crate::run`].
//!
//! Identity is two-layered: `uuid` is the permanent identity used in
//! all remote-directory communication, while `id`/`path` are a
//! storage-local identity that may be reassigned if the store is
//! rebuilt, but never while the request is live.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::RequestError;

/// One schedulable administrative task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Storage-local id, unique within a store, allocated monotonically.
    pub id: u64,
    /// Execution time estimate in seconds, always positive.
    pub estimate: u64,
    /// Command run via `sh -c`; `None` is a no-op task that still
    /// occupies a scheduled slot.
    pub script: Option<String>,
    /// Reason for the maintenance, shown to users, never interpreted.
    pub comment: Option<String>,
    /// Pre-flight check command; non-zero exit skips the script.
    pub applicable: Option<String>,
    /// Scheduled start time. Absent means "not yet scheduled"; the key
    /// is omitted from the record entirely in that case. Only ever
    /// mutated from reconciliation with the remote directory.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::timestamp::optional"
    )]
    pub starttime: Option<DateTime<Utc>>,
    /// Permanent identity, the key in all remote communication.
    pub uuid: Uuid,
    /// Spool directory owning this request's durable state. Assigned
    /// once, at first save; never serialized.
    #[serde(skip)]
    pub path: Option<PathBuf>,
}

impl Request {
    /// Create a request with a fresh uuid.
    ///
    /// Fails if `estimate` is zero.
    pub fn new(id: u64, estimate: u64) -> Result<Self, RequestError> {
        if estimate == 0 {
            return Err(RequestError::InvalidEstimate(estimate));
        }
        Ok(Self {
            id,
            estimate,
            script: None,
            comment: None,
            applicable: None,
            starttime: None,
            uuid: Uuid::new_v4(),
            path: None,
        })
    }

    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_applicable(mut self, applicable: impl Into<String>) -> Self {
        self.applicable = Some(applicable.into());
        self
    }

    pub fn with_starttime(mut self, starttime: DateTime<Utc>) -> Self {
        self.starttime = Some(starttime);
        self
    }

    /// Caller-supplied uuid, for reconstruction and tests.
    pub fn with_uuid(mut self, uuid: Uuid) -> Self {
        self.uuid = uuid;
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// The directory owning this request's durable state.
    pub fn dir(&self) -> Result<&Path, RequestError> {
        self.path.as_deref().ok_or(RequestError::Unsaved)
    }

    /// First uuid group, for logs and listings.
    pub fn short_id(&self) -> String {
        let text = self.uuid.to_string();
        text.split('-').next().unwrap_or_default().to_string()
    }

    /// Write the primary data record durably.
    ///
    /// Creates the request directory if absent and fsyncs the record
    /// before returning: a crash between save and a later operation
    /// must not corrupt scheduler state.
    pub fn save(&self) -> Result<(), RequestError> {
        let dir = self.dir()?;
        std::fs::create_dir_all(dir)?;
        let mut file = File::create(dir.join("data"))?;
        serde_json::to_writer_pretty(&mut file, self)?;
        file.write_all(b"\n")?;
        file.flush()?;
        file.sync_all()?;
        Ok(())
    }

    /// Apply a starttime decision from the remote directory.
    ///
    /// Persists only when the value actually changed; returns whether
    /// it did, so the caller can log reschedules.
    pub fn update(&mut self, starttime: Option<DateTime<Utc>>) -> Result<bool, RequestError> {
        if self.starttime == starttime {
            return Ok(false);
        }
        self.starttime = starttime;
        self.save()?;
        Ok(true)
    }

    /// Projection sent to the remote directory when pushing the
    /// current request set. Internal identifiers and execution state
    /// are never shared this way.
    pub fn rpc_summary(&self) -> RequestSummary {
        RequestSummary { estimate: self.estimate, comment: self.comment.clone() }
    }

    /// Human time estimate: hours/minutes/seconds with zero
    /// components omitted (`61` → `1m 1s`, `3600` → `1h`).
    pub fn describe_estimate(&self) -> String {
        let mut out = Vec::new();
        let mut remainder = self.estimate;
        if remainder >= 3600 {
            out.push(format!("{}h", remainder / 3600));
            remainder %= 3600;
        }
        if remainder >= 60 {
            out.push(format!("{}m", remainder / 60));
            remainder %= 60;
        }
        if remainder > 0 {
            out.push(format!("{remainder}s"));
        }
        out.join(" ")
    }
}

/// The `{estimate, comment}` projection pushed to the remote
/// directory by the reconciliation protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSummary {
    pub estimate: u64,
    pub comment: Option<String>,
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Boundary to the remote scheduling authority ("the directory").
//!
//! The directory is the sole source of truth for *when* a request
//! runs; the local spool is the sole source of truth for *what*
//! exists. Two calls cross the boundary: push the live request set
//! and receive start times, and report terminal outcomes. Both are
//! keyed by request uuid, never by the storage-local id.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

use maintq_core::request::RequestSummary;

/// Scheduling decision for one request: a start time, or none to
/// leave it unscheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    #[serde(default, with = "maintq_core::timestamp::optional")]
    pub time: Option<DateTime<Utc>>,
}

/// Terminal outcome report for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    /// Execution duration in seconds; absent when the request never
    /// ran to a measurable stop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    /// One of the terminal state labels: `success`, `error`,
    /// `too many retries`, `deleted`.
    pub result: String,
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("directory transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("directory returned status {status}: {body}")]
    Status { status: u16, body: String },
}

/// The two directory calls the scheduler consumes.
pub trait Directory {
    /// Push the current request set, receive authoritative start
    /// times. A uuid omitted from the response has been dropped by
    /// the remote authority.
    fn schedule_maintenance(
        &self,
        requests: &BTreeMap<String, RequestSummary>,
    ) -> Result<BTreeMap<String, ScheduleEntry>, DirectoryError>;

    /// Report terminal outcomes. Must be tolerated as at-least-once
    /// by the remote side.
    fn end_maintenance(
        &self,
        finished: &BTreeMap<String, Completion>,
    ) -> Result<(), DirectoryError>;
}

/// JSON-over-HTTP directory client.
///
/// Synchronous on purpose: the whole tool is a one-shot cron
/// invocation with exactly two round trips per cycle.
pub struct HttpDirectory {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpDirectory {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client: reqwest::blocking::Client::new() }
    }

    fn post<P, R>(&self, call: &str, payload: &P) -> Result<R, DirectoryError>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, call);
        debug!(%url, "directory call");
        let response = self.client.post(&url).json(payload).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }
        Ok(response.json()?)
    }
}

impl Directory for HttpDirectory {
    fn schedule_maintenance(
        &self,
        requests: &BTreeMap<String, RequestSummary>,
    ) -> Result<BTreeMap<String, ScheduleEntry>, DirectoryError> {
        self.post("schedule_maintenance", requests)
    }

    fn end_maintenance(
        &self,
        finished: &BTreeMap<String, Completion>,
    ) -> Result<(), DirectoryError> {
        let url = format!("{}/end_maintenance", self.base_url);
        debug!(%url, "directory call");
        let response = self.client.post(&url).json(finished).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }
        // Response body carries no information; status is the ack.
        Ok(())
    }
}

#[cfg(test)]
#[path = "directory_tests.rs"]
mod tests;

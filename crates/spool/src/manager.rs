// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spool manager: locked operations over the live request set.
//!
//! A periodic invocation (cron-driven) calls, in order:
//! [`ReqManager::update_schedule`] → [`ReqManager::execute_requests`]
//! → [`ReqManager::archive_requests`]. Schedule decisions flow from
//! the remote directory into request state; request outcomes flow
//! back out through completion notifications.

#[cfg(test)]
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use maintq_core::{Clock, Request, RequestError, RequestState};

use crate::directory::{Completion, Directory, DirectoryError};
use crate::lock::SpoolLock;

#[derive(Debug, Error)]
pub enum SpoolError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("request {0} not found")]
    NotFound(u64),

    #[error("corrupt id counter: {0:?}")]
    CorruptCounter(String),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Parameters for creating a request.
#[derive(Debug, Default)]
pub struct NewRequest {
    pub estimate: u64,
    pub script: Option<String>,
    pub comment: Option<String>,
    pub applicable: Option<String>,
    /// Caller-supplied uuid for reconstruction and tests; normally a
    /// fresh one is generated.
    pub uuid: Option<Uuid>,
}

/// Owns a spool directory of maintenance requests.
///
/// Every mutating or read-modify operation first acquires the store
/// lock (lazily, on first use) and the lock is held until the manager
/// is dropped, serializing whole sessions against each other
/// process-wide. Request files are only ever touched by the
/// lock-holding process, so no finer-grained locking exists.
pub struct ReqManager<C: Clock> {
    requests_dir: PathBuf,
    archive_dir: PathBuf,
    lock_path: PathBuf,
    seq_path: PathBuf,
    lock: Option<SpoolLock>,
    clock: C,
}

impl<C: Clock> ReqManager<C> {
    /// Open a spool, creating the requests/archive directories if
    /// missing. Safe to call repeatedly.
    pub fn open(spool_dir: impl Into<PathBuf>, clock: C) -> Result<Self, SpoolError> {
        let spool_dir = spool_dir.into();
        let requests_dir = spool_dir.join("requests");
        let archive_dir = spool_dir.join("archive");
        std::fs::create_dir_all(&requests_dir)?;
        std::fs::create_dir_all(&archive_dir)?;
        Ok(Self {
            lock_path: spool_dir.join(".lock"),
            seq_path: spool_dir.join(".SEQ"),
            requests_dir,
            archive_dir,
            lock: None,
            clock,
        })
    }

    /// Lazily acquire the store lock; held until the manager drops.
    fn ensure_lock(&mut self) -> Result<(), SpoolError> {
        if self.lock.is_none() {
            self.lock = Some(SpoolLock::acquire(&self.lock_path)?);
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn is_locked(&self) -> bool {
        self.lock.is_some()
    }

    fn request_path(&self, id: u64) -> PathBuf {
        self.requests_dir.join(id.to_string())
    }

    /// Allocate the next request id from the `.SEQ` counter file.
    ///
    /// Read-modify-write is safe because the caller holds the store
    /// lock; no separate counter lock is needed.
    fn allocate_id(&mut self) -> Result<u64, SpoolError> {
        self.ensure_lock()?;
        let old = match std::fs::read_to_string(&self.seq_path) {
            Ok(text) => text,
            Err(error) if error.kind() == ErrorKind::NotFound => String::new(),
            Err(error) => return Err(error.into()),
        };
        let next = match old.trim() {
            "" => 0,
            text => {
                let last: u64 =
                    text.parse().map_err(|_| SpoolError::CorruptCounter(text.to_string()))?;
                last + 1
            }
        };
        let mut file = File::create(&self.seq_path)?;
        writeln!(file, "{next}")?;
        Ok(next)
    }

    /// Create a request with a freshly allocated id, persist it, and
    /// return it.
    pub fn add_request(&mut self, new: NewRequest) -> Result<Request, SpoolError> {
        self.ensure_lock()?;
        let id = self.allocate_id()?;
        let mut request = Request::new(id, new.estimate)?;
        request.script = new.script;
        request.comment = new.comment;
        request.applicable = new.applicable;
        if let Some(uuid) = new.uuid {
            request.uuid = uuid;
        }
        request.path = Some(self.request_path(id));
        request.save()?;
        info!(uuid = %request.uuid, "creating new maintenance request");
        if request.script.is_none() {
            // No-op slots are valid; they still occupy a window.
            warn!(request = %request.short_id(), "empty script -- hope that's ok");
        }
        debug!(request = %request.short_id(), path = ?request.path, "saved");
        Ok(request)
    }

    /// Load one request by storage-local id.
    pub fn load_request(&self, id: u64) -> Result<Request, SpoolError> {
        let path = self.request_path(id);
        let file = File::open(path.join("data")).map_err(|error| {
            if error.kind() == ErrorKind::NotFound {
                SpoolError::NotFound(id)
            } else {
                error.into()
            }
        })?;
        let mut request: Request =
            serde_json::from_reader(file).map_err(RequestError::Record)?;
        request.path = Some(path);
        Ok(request)
    }

    /// All live requests, keyed by uuid (the stable external
    /// identity). Entries that do not parse as an id, fail to load,
    /// or report DELETED are skipped: one corrupt request must not
    /// block visibility of the others.
    pub fn requests(&self) -> BTreeMap<String, Request> {
        let now = self.clock.now();
        let mut requests = BTreeMap::new();
        let Ok(entries) = std::fs::read_dir(&self.requests_dir) else {
            return requests;
        };
        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(id) = name.to_str().and_then(|name| name.parse::<u64>().ok()) else {
                continue;
            };
            match self.load_request(id) {
                Ok(request) if request.state(now) == RequestState::Deleted => {}
                Ok(request) => {
                    requests.insert(request.uuid.to_string(), request);
                }
                Err(error) => {
                    debug!(id, %error, "skipping unreadable spool entry");
                }
            }
        }
        requests
    }

    /// Requests in execution order: RUNNING first (crash recovery),
    /// then TEMPFAIL by ascending starttime, then DUE by ascending
    /// starttime. The id is the deterministic tiebreak.
    pub fn runnable_requests(&mut self) -> Result<Vec<Request>, SpoolError> {
        self.ensure_lock()?;
        let now = self.clock.now();
        let mut running = Vec::new();
        let mut tempfail = Vec::new();
        let mut due = Vec::new();
        for request in self.requests().into_values() {
            match request.state(now) {
                RequestState::Running => running.push(request),
                RequestState::Tempfail => tempfail.push(request),
                RequestState::Due => due.push(request),
                _ => {}
            }
        }
        running.sort_by_key(|request| request.id);
        tempfail.sort_by_key(|request| (request.starttime, request.id));
        due.sort_by_key(|request| (request.starttime, request.id));
        running.extend(tempfail);
        running.extend(due);
        Ok(running)
    }

    /// Reconcile the live set with the remote directory.
    ///
    /// Push uuid → `{estimate, comment}` for every live request (the
    /// call is skipped entirely when there are none) and apply the
    /// returned start times. A local uuid absent from the response
    /// has been dropped by the remote authority: it is reported once
    /// via `end_maintenance` with result `deleted` and then moved to
    /// the archive. A response uuid with no local match indicates a
    /// protocol problem on the remote side and is logged loudly.
    pub fn update_schedule(&mut self, directory: &impl Directory) -> Result<(), SpoolError> {
        self.ensure_lock()?;
        let mut requests = self.requests();
        if requests.is_empty() {
            return Ok(());
        }
        let summaries: BTreeMap<String, _> = requests
            .iter()
            .map(|(uuid, request)| (uuid.clone(), request.rpc_summary()))
            .collect();
        let schedule = directory.schedule_maintenance(&summaries)?;

        for uuid in schedule.keys() {
            if !requests.contains_key(uuid) {
                warn!(%uuid, "directory scheduled a request this host never sent");
            }
        }

        let mut dropped = BTreeMap::new();
        for (uuid, request) in requests.iter_mut() {
            match schedule.get(uuid) {
                Some(entry) => {
                    if request.update(entry.time)? {
                        info!(
                            request = %request.short_id(),
                            time = ?entry.time,
                            "changing start time"
                        );
                    }
                }
                None => {
                    warn!(
                        request = %request.short_id(),
                        "dropped by directory, marking as deleted"
                    );
                    dropped.insert(
                        uuid.clone(),
                        Completion {
                            duration: request.execution_time(),
                            result: RequestState::Deleted.to_string(),
                        },
                    );
                }
            }
        }

        if !dropped.is_empty() {
            directory.end_maintenance(&dropped)?;
            for uuid in dropped.keys() {
                if let Some(request) = requests.get(uuid) {
                    self.archive_one(request)?;
                }
            }
        }
        Ok(())
    }

    /// Execute runnable requests in order.
    ///
    /// TEMPFAIL suspends the rest of the batch so a retrying request
    /// is not skipped over; ERROR and RETRYLIMIT are logged and the
    /// batch continues, so a permanently broken request cannot block
    /// the others indefinitely.
    pub fn execute_requests(&mut self) -> Result<(), SpoolError> {
        self.ensure_lock()?;
        for request in self.runnable_requests()? {
            debug!(
                request = %request.short_id(),
                starttime = ?request.starttime,
                "next request"
            );
            request.execute(&self.clock);
            match request.state(self.clock.now()) {
                RequestState::Tempfail => {
                    info!(request = %request.short_id(), "returned TEMPFAIL, suspending batch");
                    break;
                }
                state @ (RequestState::Error | RequestState::Retrylimit) => {
                    warn!(request = %request.short_id(), %state, "request failed");
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Report and archive all terminal requests.
    ///
    /// Notifies the directory first, then moves the directories:
    /// a crash in between re-notifies on the next cycle, which the
    /// remote side must tolerate (at-least-once).
    pub fn archive_requests(&mut self, directory: &impl Directory) -> Result<(), SpoolError> {
        self.ensure_lock()?;
        let now = self.clock.now();
        let mut finished = BTreeMap::new();
        let mut terminal = Vec::new();
        for (uuid, request) in self.requests() {
            let state = request.state(now);
            if state.is_terminal() {
                finished.insert(
                    uuid,
                    Completion { duration: request.execution_time(), result: state.to_string() },
                );
                terminal.push(request);
            }
        }
        if finished.is_empty() {
            return Ok(());
        }
        debug!(count = finished.len(), "reporting finished requests");
        directory.end_maintenance(&finished)?;
        for request in terminal {
            self.archive_one(&request)?;
        }
        Ok(())
    }

    fn archive_one(&self, request: &Request) -> Result<(), SpoolError> {
        info!(request = %request.short_id(), "completed, archiving request");
        std::fs::rename(
            self.request_path(request.id),
            self.archive_dir.join(request.id.to_string()),
        )?;
        Ok(())
    }

    /// Human-readable listing of the live request set, one block per
    /// request, ordered by id.
    pub fn render_listing(&self) -> String {
        let now = self.clock.now();
        let mut requests: Vec<_> = self.requests().into_values().collect();
        requests.sort_by_key(|request| request.id);
        let mut out = String::new();
        for request in requests {
            let scheduled = match request.starttime {
                Some(time) => time.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
                None => "None".to_string(),
            };
            let _ = writeln!(
                out,
                "({}) scheduled: {}, estimate: {}, state: {}",
                request.short_id(),
                scheduled,
                request.describe_estimate(),
                request.state(now)
            );
            if let Some(comment) = &request.comment {
                let _ = writeln!(out, "{comment}");
            }
            let _ = writeln!(out);
        }
        out
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;

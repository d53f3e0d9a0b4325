// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `maintq run` / `maintq schedule` specs
//!
//! The cycle commands need a directory endpoint, but reconciliation is
//! skipped entirely while the spool is empty, so they work offline
//! until the first request exists.

use crate::prelude::*;

#[test]
fn schedule_without_directory_url_fails() {
    let spool = Spool::empty();
    spool.maintq().args(&["schedule"]).fails().stderr_has("no directory url configured");
}

#[test]
fn run_without_directory_url_fails() {
    let spool = Spool::empty();
    spool.maintq().args(&["run"]).fails().stderr_has("no directory url configured");
}

#[test]
fn run_on_empty_spool_never_contacts_directory() {
    let spool = Spool::empty();
    // Port 1 refuses connections; an empty spool must not notice.
    spool
        .maintq()
        .args(&["run", "--directory-url", "http://127.0.0.1:1/"])
        .passes();
}

#[test]
fn schedule_propagates_directory_transport_errors() {
    let spool = Spool::empty();
    spool.maintq().args(&["add", "--estimate", "60"]).passes();
    spool
        .maintq()
        .args(&["schedule"])
        .env("MAINTQ_DIRECTORY_URL", "http://127.0.0.1:1/")
        .fails();
}

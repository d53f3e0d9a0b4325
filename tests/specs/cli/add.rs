// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `maintq add` specs: spool bootstrap and durable request records

use crate::prelude::*;

#[test]
fn add_bootstraps_spool_and_writes_record() {
    let spool = Spool::empty();
    let uuid = spool
        .maintq()
        .args(&["add", "--estimate", "300", "--script", "true", "--comment", "kernel update"])
        .passes()
        .stdout()
        .trim()
        .to_string();

    assert!(spool.path().join("requests").is_dir());
    assert!(spool.path().join("archive").is_dir());
    assert_eq!(std::fs::read_to_string(spool.path().join(".SEQ")).unwrap(), "0\n");

    let data = std::fs::read_to_string(spool.path().join("requests/0/data")).unwrap();
    let record: serde_json::Value = serde_json::from_str(&data).unwrap();
    assert_eq!(record["id"], 0);
    assert_eq!(record["estimate"], 300);
    assert_eq!(record["script"], "true");
    assert_eq!(record["comment"], "kernel update");
    assert_eq!(record["uuid"], uuid.as_str());
    // Unscheduled requests carry no starttime key at all.
    assert!(record.get("starttime").is_none());
}

#[test]
fn successive_adds_get_increasing_ids() {
    let spool = Spool::empty();
    spool.maintq().args(&["add", "--estimate", "1"]).passes();
    spool.maintq().args(&["add", "--estimate", "1"]).passes();

    assert!(spool.path().join("requests/0/data").is_file());
    assert!(spool.path().join("requests/1/data").is_file());
    assert_eq!(std::fs::read_to_string(spool.path().join(".SEQ")).unwrap(), "1\n");
}

#[test]
fn zero_estimate_is_rejected() {
    let spool = Spool::empty();
    spool
        .maintq()
        .args(&["add", "--estimate", "0"])
        .fails()
        .stderr_has("estimate must be positive");
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `maintq list` specs

use crate::prelude::*;

#[test]
fn empty_spool_lists_nothing() {
    let spool = Spool::empty();
    let output = spool.maintq().args(&["list"]).passes().stdout();
    assert_eq!(output, "");
}

#[test]
fn listing_shows_state_estimate_and_comment() {
    let spool = Spool::empty();
    let uuid = spool
        .maintq()
        .args(&["add", "--estimate", "3661", "--comment", "replace fan"])
        .passes()
        .stdout()
        .trim()
        .to_string();
    let short = uuid.split('-').next().unwrap();

    spool
        .maintq()
        .args(&["list"])
        .passes()
        .stdout_has(&format!("({short}) scheduled: None, estimate: 1h 1m 1s, state: pending"))
        .stdout_has("replace fan");
}

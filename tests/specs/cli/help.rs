// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Help output specs

use crate::prelude::*;

#[test]
fn no_args_shows_usage_and_exits_nonzero() {
    maintq().fails().stderr_has("Usage:");
}

#[test]
fn help_lists_all_subcommands() {
    maintq()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("list")
        .stdout_has("add")
        .stdout_has("schedule")
        .stdout_has("run");
}

#[test]
fn add_help_shows_request_options() {
    maintq()
        .args(&["add", "--help"])
        .passes()
        .stdout_has("--estimate")
        .stdout_has("--script")
        .stdout_has("--comment")
        .stdout_has("--applicable");
}

#[test]
fn version_shows_version() {
    maintq().args(&["--version"]).passes().stdout_has("0.1");
}

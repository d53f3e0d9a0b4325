// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use clap::CommandFactory;
use std::path::Path;

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn spool_defaults_to_var_spool_maintenance() {
    let cli = Cli::try_parse_from(["maintq", "list"]).unwrap();
    assert_eq!(cli.spool, Path::new("/var/spool/maintenance"));
}

#[test]
fn spool_flag_works_after_the_subcommand() {
    let cli = Cli::try_parse_from(["maintq", "list", "--spool", "/tmp/spool"]).unwrap();
    assert_eq!(cli.spool, Path::new("/tmp/spool"));
}

#[test]
fn add_parses_all_request_options() {
    let cli = Cli::try_parse_from([
        "maintq",
        "add",
        "--estimate",
        "300",
        "--script",
        "reboot",
        "--comment",
        "kernel update",
        "--applicable",
        "true",
    ])
    .unwrap();
    let Command::Add(args) = cli.command else {
        panic!("expected add subcommand");
    };
    assert_eq!(args.estimate, 300);
    assert_eq!(args.script.as_deref(), Some("reboot"));
    assert_eq!(args.comment.as_deref(), Some("kernel update"));
    assert_eq!(args.applicable.as_deref(), Some("true"));
}

#[test]
fn add_requires_an_estimate() {
    assert!(Cli::try_parse_from(["maintq", "add"]).is_err());
}

#[test]
fn missing_directory_url_is_an_error() {
    assert!(directory(None).is_err());
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod add;
pub mod list;
pub mod run;
pub mod schedule;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use maintq_spool::HttpDirectory;

#[derive(Parser)]
#[command(name = "maintq", version, about = "Durable maintenance request scheduler")]
pub struct Cli {
    /// Spool directory holding live and archived requests
    #[arg(long, global = true, default_value = "/var/spool/maintenance")]
    pub spool: PathBuf,

    /// Base URL of the remote scheduling directory
    #[arg(long, global = true, env = "MAINTQ_DIRECTORY_URL")]
    pub directory_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show all live maintenance requests
    List,
    /// Enqueue a new maintenance request
    Add(add::AddArgs),
    /// Reconcile start times with the remote directory
    Schedule,
    /// One full cycle: reconcile, execute due requests, archive
    Run,
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::List => list::run(&cli.spool),
        Command::Add(args) => add::run(&cli.spool, args),
        Command::Schedule => schedule::run(&cli.spool, &directory(cli.directory_url)?),
        Command::Run => run::run(&cli.spool, &directory(cli.directory_url)?),
    }
}

/// The remote directory client; `list` and `add` never need one.
fn directory(url: Option<String>) -> Result<HttpDirectory> {
    let Some(url) = url else {
        bail!("no directory url configured (set --directory-url or MAINTQ_DIRECTORY_URL)");
    };
    Ok(HttpDirectory::new(url))
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

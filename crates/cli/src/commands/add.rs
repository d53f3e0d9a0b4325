// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `maintq add`: enqueue a new maintenance request

use anyhow::Result;
use clap::Args;
use std::path::Path;

use maintq_core::SystemClock;
use maintq_spool::{NewRequest, ReqManager};

#[derive(Args)]
pub struct AddArgs {
    /// Estimated duration in seconds (must be positive)
    #[arg(long)]
    pub estimate: u64,

    /// Command executed via `sh -c` when the request is due
    #[arg(long)]
    pub script: Option<String>,

    /// Reason for the maintenance, shown in listings
    #[arg(long)]
    pub comment: Option<String>,

    /// Pre-flight check command; non-zero exit skips the script
    #[arg(long)]
    pub applicable: Option<String>,
}

pub fn run(spool: &Path, args: AddArgs) -> Result<()> {
    let mut manager = ReqManager::open(spool, SystemClock)?;
    let request = manager.add_request(NewRequest {
        estimate: args.estimate,
        script: args.script,
        comment: args.comment,
        applicable: args.applicable,
        uuid: None,
    })?;
    println!("{}", request.uuid);
    Ok(())
}

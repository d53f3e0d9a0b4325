// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `maintq schedule`: reconcile start times with the remote directory

use anyhow::Result;
use std::path::Path;

use maintq_core::SystemClock;
use maintq_spool::{Directory, ReqManager};

pub fn run(spool: &Path, directory: &impl Directory) -> Result<()> {
    let mut manager = ReqManager::open(spool, SystemClock)?;
    manager.update_schedule(directory)?;
    Ok(())
}

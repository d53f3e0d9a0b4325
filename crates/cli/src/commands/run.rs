// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `maintq run`: the periodic maintenance cycle
//!
//! Reconcile first so freshly granted start times take effect in the
//! same invocation, then execute whatever is due, then report and
//! archive terminal requests. Each phase is useful on its own after a
//! crash; none assumes the previous invocation completed.

use anyhow::Result;
use std::path::Path;
use tracing::debug;

use maintq_core::SystemClock;
use maintq_spool::{Directory, ReqManager};

pub fn run(spool: &Path, directory: &impl Directory) -> Result<()> {
    let mut manager = ReqManager::open(spool, SystemClock)?;
    debug!("reconciling schedule");
    manager.update_schedule(directory)?;
    debug!("executing due requests");
    manager.execute_requests()?;
    debug!("archiving finished requests");
    manager.archive_requests(directory)?;
    Ok(())
}

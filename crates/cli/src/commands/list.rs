// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `maintq list`: human-readable request listing

use anyhow::Result;
use std::path::Path;

use maintq_core::SystemClock;
use maintq_spool::ReqManager;

pub fn run(spool: &Path) -> Result<()> {
    let manager = ReqManager::open(spool, SystemClock)?;
    print!("{}", manager.render_listing());
    Ok(())
}

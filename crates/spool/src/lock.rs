// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Store-wide advisory lock.
//!
//! One exclusive lock file per spool serializes entire manager
//! sessions against each other. Acquisition blocks indefinitely: an
//! invocation stalled behind a hung script delays later invocations
//! rather than failing them. That is an accepted operational risk.

use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Held exclusive lock on `<spool>/.lock`. Released on drop.
pub struct SpoolLock {
    file: File,
}

impl SpoolLock {
    /// Block until the exclusive lock is acquired, then record our pid
    /// in the lock file.
    ///
    /// The file is opened without truncation so an existing holder's
    /// pid is not wiped before we actually hold the lock.
    pub fn acquire(path: &Path) -> std::io::Result<Self> {
        let mut file =
            OpenOptions::new().write(true).create(true).truncate(false).open(path)?;
        file.lock_exclusive()?;
        file.set_len(0)?;
        writeln!(file, "{}", std::process::id())?;
        file.flush()?;
        Ok(Self { file })
    }
}

impl Drop for SpoolLock {
    fn drop(&mut self) {
        let _ = self.file.set_len(0);
        let _ = fs2::FileExt::unlock(&self.file);
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;

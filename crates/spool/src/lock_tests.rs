// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn acquire_creates_lock_file_with_pid() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".lock");
    let _lock = SpoolLock::acquire(&path).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.trim(), std::process::id().to_string());
}

#[test]
fn drop_releases_the_lock() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".lock");
    {
        let _lock = SpoolLock::acquire(&path).unwrap();
    }
    // Re-acquisition would block forever if the lock were still held.
    let _lock = SpoolLock::acquire(&path).unwrap();
}

#[test]
fn reacquisition_does_not_accumulate_pids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".lock");
    drop(SpoolLock::acquire(&path).unwrap());
    let _lock = SpoolLock::acquire(&path).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 1);
}

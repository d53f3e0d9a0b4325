// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! maintq-spool: the maintenance request store.
//!
//! A spool directory owns all live and archived requests plus the
//! store lock and the id-allocation counter:
//!
//! ```text
//! <spool>/
//!   .lock          advisory lock file
//!   .SEQ           last-allocated id, text integer
//!   requests/<id>/ live requests
//!   archive/<id>/  terminal requests
//! ```
//!
//! [`ReqManager`] serializes whole sessions against each other with a
//! single blocking lock; [`Directory`] is the boundary to the remote
//! scheduling authority.

pub mod directory;
pub mod lock;
pub mod manager;

pub use directory::{Completion, Directory, DirectoryError, HttpDirectory, ScheduleEntry};
pub use lock::SpoolLock;
pub use manager::{NewRequest, ReqManager, SpoolError};

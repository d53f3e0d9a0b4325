// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! maintq-core: maintenance request model and state machine.
//!
//! A [`Request`] is one schedulable administrative task. Its durable
//! representation is a directory of marker files; its processing state
//! is recomputed from those markers on every query, never cached.

pub mod clock;
pub mod error;
pub mod request;
pub mod run;
pub mod state;
pub mod timestamp;

pub use clock::{Clock, FakeClock, SystemClock};
pub use error::RequestError;
pub use request::{Request, RequestSummary};
pub use run::{EXIT_TEMPFAIL, MAX_ATTEMPTS};
pub use state::RequestState;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request construction and persistence errors

use thiserror::Error;

/// Errors that can occur while building or persisting a request
#[derive(Debug, Error)]
pub enum RequestError {
    /// Estimates are duration hints shown to users and sent to the
    /// remote scheduler; zero would make the request unschedulable.
    #[error("estimate must be positive, got {0}")]
    InvalidEstimate(u64),

    #[error("request has no spool path assigned")]
    Unsaved,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("data record error: {0}")]
    Record(#[from] serde_json::Error),

    #[error("invalid timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),
}

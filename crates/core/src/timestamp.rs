// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! RFC 3339 timestamp formatting shared by the data record and the
//! marker files.
//!
//! Timestamps are written with a numeric UTC offset (`+00:00`) rather
//! than the `Z` suffix so the on-disk format carries an explicit
//! offset. Parsing accepts any RFC 3339 offset and normalizes to UTC.

use chrono::{DateTime, SecondsFormat, Utc};

/// Render a timestamp the way it is stored on disk.
pub fn format(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Parse a stored timestamp back into UTC.
pub fn parse(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    Ok(DateTime::parse_from_rfc3339(text.trim())?.with_timezone(&Utc))
}

/// Serde adapter for optional timestamp fields.
///
/// Used with `#[serde(default, skip_serializing_if = "Option::is_none")]`
/// so an unscheduled request has no `starttime` key at all.
pub mod optional {
    use super::{format, parse};
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(time) => serializer.serialize_str(&format(*time)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) => parse(&text).map(Some).map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
#[path = "timestamp_tests.rs"]
mod tests;

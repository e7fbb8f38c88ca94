//! Event domain model.
//!
//! # Responsibility
//! - Define the canonical incident record shared by archive and feed payloads.
//! - Parse the textual `datetime` field with the single agreed format.
//!
//! # Invariants
//! - `id` is the identity and deduplication key within a reconciled corpus.
//! - Events are never mutated after decoding; pipeline stages only reorder
//!   or filter them.
//! - `datetime` must parse with [`DATETIME_FORMAT`]; a failure is a
//!   data-integrity error, never a silent skip.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Identity key assigned by the source feed.
pub type EventId = i64;

/// Wire format of [`Event::datetime`], e.g. `2023-04-26 10:29:50 +02:00`.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %:z";

/// Raised when an event carries a timestamp that does not match
/// [`DATETIME_FORMAT`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeParseError {
    pub event_id: EventId,
    pub value: String,
    pub source: DatetimeFormatError,
}

impl Display for TimeParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "event {} has unparsable datetime `{}`: {}",
            self.event_id, self.value, self.source
        )
    }
}

impl Error for TimeParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Why a timestamp failed [`parse_datetime`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatetimeFormatError {
    /// Leading or trailing whitespace around an otherwise valid layout.
    Padded,
    Layout(chrono::ParseError),
}

impl Display for DatetimeFormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Padded => write!(f, "surrounding whitespace is not allowed"),
            Self::Layout(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DatetimeFormatError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Padded => None,
            Self::Layout(err) => Some(err),
        }
    }
}

/// Where an incident was reported.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    /// Grouping key for location subcategories.
    pub name: String,
    /// Opaque `"lat,lon"` passthrough.
    pub gps: String,
}

/// Canonical incident record as published by the source feed.
///
/// Field names match the feed and archive JSON exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    /// Textual timestamp; see [`DATETIME_FORMAT`].
    pub datetime: String,
    /// Short human-readable title.
    pub name: String,
    /// Short description; may be empty.
    pub summary: String,
    /// Path of the detail page relative to the source origin.
    pub url: String,
    /// Serialized as `type`; open-ended label, see [`crate::model::catalog`].
    #[serde(rename = "type")]
    pub kind: String,
    pub location: Location,
}

impl Event {
    /// Parses `datetime` into an offset-aware instant.
    ///
    /// # Errors
    /// - Returns [`TimeParseError`] naming this event and the raw value when
    ///   the text does not match [`DATETIME_FORMAT`].
    pub fn parsed_datetime(&self) -> Result<DateTime<FixedOffset>, TimeParseError> {
        parse_datetime(&self.datetime).map_err(|source| TimeParseError {
            event_id: self.id,
            value: self.datetime.clone(),
            source,
        })
    }
}

/// Parses one feed timestamp with [`DATETIME_FORMAT`].
///
/// The text must match exactly; chrono alone would skip leading whitespace.
pub fn parse_datetime(value: &str) -> Result<DateTime<FixedOffset>, DatetimeFormatError> {
    if value.trim() != value {
        return Err(DatetimeFormatError::Padded);
    }
    DateTime::parse_from_str(value, DATETIME_FORMAT).map_err(DatetimeFormatError::Layout)
}

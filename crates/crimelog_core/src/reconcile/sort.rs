//! Selectable corpus orderings.
//!
//! # Invariants
//! - Every ordering is ascending and stable.
//! - `Datetime` parses every timestamp before sorting; one bad value fails
//!   the whole sort.
//! - `Type` and `Location` compare strings by code point, without locale
//!   collation.

use crate::model::event::{Event, TimeParseError};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Field a corpus can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    Id,
    #[default]
    Datetime,
    Type,
    Location,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [Self::Id, Self::Datetime, Self::Type, Self::Location];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Datetime => "datetime",
            Self::Type => "type",
            Self::Location => "location",
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized sort key text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSortKey(pub String);

impl Display for UnknownSortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown sort key `{}`; expected id|datetime|type|location",
            self.0
        )
    }
}

impl std::error::Error for UnknownSortKey {}

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    /// Accepts full names and the single-letter menu aliases `i|d|t|l`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "id" | "i" => Ok(Self::Id),
            "datetime" | "d" => Ok(Self::Datetime),
            "type" | "t" => Ok(Self::Type),
            "location" | "l" => Ok(Self::Location),
            _ => Err(UnknownSortKey(value.to_string())),
        }
    }
}

/// Comparison strategy for one [`SortKey`].
///
/// Infallible keys compare events directly; `Datetime` needs a parse pass
/// first and is handled by [`sort_events`].
trait EventOrder {
    fn compare(a: &Event, b: &Event) -> Ordering;
}

struct ById;
struct ByType;
struct ByLocation;

impl EventOrder for ById {
    fn compare(a: &Event, b: &Event) -> Ordering {
        a.id.cmp(&b.id)
    }
}

impl EventOrder for ByType {
    fn compare(a: &Event, b: &Event) -> Ordering {
        a.kind.cmp(&b.kind)
    }
}

impl EventOrder for ByLocation {
    fn compare(a: &Event, b: &Event) -> Ordering {
        a.location.name.cmp(&b.location.name)
    }
}

fn sorted_with<O: EventOrder>(events: &[Event]) -> Vec<Event> {
    let mut ordered = events.to_vec();
    ordered.sort_by(O::compare);
    ordered
}

fn sorted_by_datetime(events: &[Event]) -> Result<Vec<Event>, TimeParseError> {
    let mut keyed = events
        .iter()
        .map(|event| event.parsed_datetime().map(|at| (at, event)))
        .collect::<Result<Vec<_>, TimeParseError>>()?;
    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
    Ok(keyed.into_iter().map(|(_, event)| event.clone()).collect())
}

/// Returns a new, stably ordered copy of `events`.
///
/// # Errors
/// - Returns [`TimeParseError`] for the first unparsable timestamp when
///   `key == SortKey::Datetime`. Other keys never fail.
pub fn sort_events(events: &[Event], key: SortKey) -> Result<Vec<Event>, TimeParseError> {
    match key {
        SortKey::Id => Ok(sorted_with::<ById>(events)),
        SortKey::Datetime => sorted_by_datetime(events),
        SortKey::Type => Ok(sorted_with::<ByType>(events)),
        SortKey::Location => Ok(sorted_with::<ByLocation>(events)),
    }
}

//! Subcategory views over a corpus.
//!
//! # Invariants
//! - Matching is case-insensitive for both Type and Location: both sides are
//!   trimmed and Unicode lower-cased before comparing, so filters and
//!   [`partition`] agree on group membership.
//! - Filters preserve input relative order.
//! - An unknown key yields an empty sequence, not an error.

use crate::model::event::Event;
use std::collections::BTreeMap;

/// Event field a subcategory is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubcategoryKind {
    Type,
    Location,
}

impl SubcategoryKind {
    fn field(self, event: &Event) -> &str {
        match self {
            Self::Type => event.kind.as_str(),
            Self::Location => event.location.name.as_str(),
        }
    }
}

/// Named slice of a corpus sharing one Type or Location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subcategory {
    /// First-seen spelling of the key.
    pub key: String,
    pub events: Vec<Event>,
}

fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Returns events whose `kind` field matches `kind_key`.
pub fn filter_by_type(events: &[Event], kind_key: &str) -> Vec<Event> {
    filter_by(events, SubcategoryKind::Type, kind_key)
}

/// Returns events whose `location.name` matches `location_key`.
pub fn filter_by_location(events: &[Event], location_key: &str) -> Vec<Event> {
    filter_by(events, SubcategoryKind::Location, location_key)
}

/// Returns events whose `kind`-selected field matches `key`.
pub fn filter_by(events: &[Event], kind: SubcategoryKind, key: &str) -> Vec<Event> {
    let needle = normalize_key(key);
    events
        .iter()
        .filter(|event| normalize_key(kind.field(event)) == needle)
        .cloned()
        .collect()
}

/// Groups the corpus into subcategories.
///
/// Groups are ordered by normalized key; events inside a group keep input
/// order.
pub fn partition(events: &[Event], kind: SubcategoryKind) -> Vec<Subcategory> {
    let mut groups: BTreeMap<String, Subcategory> = BTreeMap::new();
    for event in events {
        let raw = kind.field(event);
        groups
            .entry(normalize_key(raw))
            .or_insert_with(|| Subcategory {
                key: raw.trim().to_string(),
                events: Vec::new(),
            })
            .events
            .push(event.clone());
    }
    groups.into_values().collect()
}

/// Distinct subcategory keys present in the corpus.
pub fn subcategory_keys(events: &[Event], kind: SubcategoryKind) -> Vec<String> {
    partition(events, kind)
        .into_iter()
        .map(|group| group.key)
        .collect()
}

//! Id-based deduplicating merge.

use crate::model::event::{Event, EventId};
use std::collections::HashSet;

/// Result of [`merge_events`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    /// First-seen occurrence of every id, archive order then fresh order.
    pub merged: Vec<Event>,
    /// Occurrences dropped because their id was already taken.
    pub duplicates: usize,
}

/// Merges `archived` followed by `fresh`, keeping the first occurrence of
/// each id.
///
/// # Contract
/// - `merged.len() + duplicates == archived.len() + fresh.len()`.
/// - Relative order of kept events is preserved.
/// - Repeated ids inside `fresh` itself are dropped and counted too.
pub fn merge_events(archived: &[Event], fresh: &[Event]) -> MergeOutcome {
    let mut seen: HashSet<EventId> = HashSet::with_capacity(archived.len() + fresh.len());
    let mut merged = Vec::with_capacity(archived.len() + fresh.len());
    let mut duplicates = 0;

    for event in archived.iter().chain(fresh) {
        if seen.insert(event.id) {
            merged.push(event.clone());
        } else {
            duplicates += 1;
        }
    }

    MergeOutcome { merged, duplicates }
}

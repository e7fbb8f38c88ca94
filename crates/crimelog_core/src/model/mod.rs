//! Domain model for reported incidents.
//!
//! # Responsibility
//! - Define the `Event` record exactly as it appears on the wire.
//! - Keep the open-ended type catalog as reference data, not as an enum.
//!
//! # Invariants
//! - Every event is identified by a feed-assigned `EventId`.
//! - Unknown `type` labels are accepted as-is.

pub mod catalog;
pub mod event;

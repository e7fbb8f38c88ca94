//! Pure corpus transformations: merge, sort and subcategory extraction.
//!
//! # Responsibility
//! - Combine archived and freshly fetched events without duplicate ids.
//! - Produce deterministic orderings and filtered views for presentation.
//!
//! # Invariants
//! - Functions here never mutate their input; they return new sequences.
//! - All orderings are stable with respect to equal keys.

pub mod category;
pub mod merge;
pub mod sort;

//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the durable load/save contract for the event corpus.
//! - Isolate file-system details from reconciliation and orchestration.
//!
//! # Invariants
//! - Repository APIs surface corrupt state as errors instead of masking it.
//! - Saves replace the whole corpus; there is no append path.

pub mod archive_repo;

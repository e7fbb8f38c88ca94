//! Core reconciliation and archival logic for crimelog.
//! This crate is the single source of truth for corpus invariants.

pub mod codec;
pub mod config;
pub mod fetch;
pub mod logging;
pub mod model;
pub mod reconcile;
pub mod repo;
pub mod service;

pub use codec::{decode_events, encode_events, DecodeError, DecodeResult};
pub use config::{ConfigError, CoreConfig};
pub use fetch::{resolve_detail_url, EventSource, FetchError, FetchResult, HttpEventSource};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::catalog::{is_known_type, TYPE_CATALOG};
pub use model::event::{
    parse_datetime, DatetimeFormatError, Event, EventId, Location, TimeParseError,
    DATETIME_FORMAT,
};
pub use reconcile::category::{
    filter_by, filter_by_location, filter_by_type, partition, subcategory_keys, Subcategory,
    SubcategoryKind,
};
pub use reconcile::merge::{merge_events, MergeOutcome};
pub use reconcile::sort::{sort_events, SortKey, UnknownSortKey};
pub use repo::archive_repo::{
    ArchiveError, ArchiveRepository, ArchiveResult, InMemoryArchive, JsonFileArchive,
};
pub use service::archive_service::{ArchiveService, SyncError, SyncReport, SyncResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

//! Archive use-case service.
//!
//! # Responsibility
//! - Run the fetch → decode → load → merge → sort → save pipeline.
//! - Expose ordered and filtered corpus views to front ends.
//!
//! # Invariants
//! - Any failure before the save step aborts the run; no partial corpus is
//!   ever written.
//! - A corrupt archive is surfaced, never replaced by the fresh payload.
//! - The persisted corpus has unique ids and is in chronological order.
//! - Service layer stays storage- and transport-agnostic.

use crate::codec::{decode_events, DecodeError};
use crate::fetch::{resolve_detail_url, EventSource, FetchError};
use crate::model::event::{Event, EventId, TimeParseError};
use crate::reconcile::category::{filter_by, partition, Subcategory, SubcategoryKind};
use crate::reconcile::merge::merge_events;
use crate::reconcile::sort::{sort_events, SortKey};
use crate::repo::archive_repo::{ArchiveError, ArchiveRepository};
use log::{error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type SyncResult<T> = Result<T, SyncError>;

/// Service error for pipeline and query use-cases.
#[derive(Debug)]
pub enum SyncError {
    /// Feed could not be retrieved; nothing was merged or saved.
    Fetch(FetchError),
    /// Feed payload is malformed; nothing was merged or saved.
    Decode(DecodeError),
    /// Archive could not be read, is corrupt, or could not be written.
    Archive(ArchiveError),
    /// A corpus event carries an unparsable timestamp.
    TimeParse(TimeParseError),
    /// Caller tried to persist a corpus with a repeated id.
    DuplicateId(EventId),
}

impl Display for SyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetch(err) => write!(f, "{err}"),
            Self::Decode(err) => write!(f, "feed payload rejected: {err}"),
            Self::Archive(err) => write!(f, "{err}"),
            Self::TimeParse(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "corpus contains duplicate event id {id}"),
        }
    }
}

impl Error for SyncError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Fetch(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::Archive(err) => Some(err),
            Self::TimeParse(err) => Some(err),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<FetchError> for SyncError {
    fn from(value: FetchError) -> Self {
        Self::Fetch(value)
    }
}

impl From<DecodeError> for SyncError {
    fn from(value: DecodeError) -> Self {
        Self::Decode(value)
    }
}

impl From<ArchiveError> for SyncError {
    fn from(value: ArchiveError) -> Self {
        Self::Archive(value)
    }
}

impl From<TimeParseError> for SyncError {
    fn from(value: TimeParseError) -> Self {
        Self::TimeParse(value)
    }
}

/// Counters describing one completed sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncReport {
    /// Events in the feed payload.
    pub fetched: usize,
    /// Events in the archive before the run.
    pub archived: usize,
    /// Occurrences dropped by the merge.
    pub duplicates: usize,
    /// Events in the persisted corpus.
    pub total: usize,
}

impl SyncReport {
    /// Events that were not in the archive before this run.
    pub fn added(&self) -> usize {
        self.total.saturating_sub(self.archived)
    }
}

/// Facade over an event source and an archive repository.
pub struct ArchiveService<S: EventSource, A: ArchiveRepository> {
    source: S,
    archive: A,
    detail_origin: String,
}

impl<S: EventSource, A: ArchiveRepository> ArchiveService<S, A> {
    /// Creates a service; `detail_origin` prefixes relative event URLs.
    pub fn new(source: S, archive: A, detail_origin: impl Into<String>) -> Self {
        Self {
            source,
            archive,
            detail_origin: detail_origin.into(),
        }
    }

    /// Fetches the feed and merges it into the archive.
    ///
    /// # Contract
    /// - Order: fetch, decode, load, merge, sort by datetime, save.
    /// - Fetch, decode, load and time-parse failures abort before saving.
    /// - Save failures leave the previous archive intact.
    pub fn sync(&self) -> SyncResult<SyncReport> {
        let started_at = Instant::now();
        info!("event=sync module=service status=start");

        match self.run_sync() {
            Ok(report) => {
                info!(
                    "event=sync module=service status=ok fetched={} archived={} duplicates={} added={} total={} duration_ms={}",
                    report.fetched,
                    report.archived,
                    report.duplicates,
                    report.added(),
                    report.total,
                    started_at.elapsed().as_millis()
                );
                Ok(report)
            }
            Err(err) => {
                error!(
                    "event=sync module=service status=error error_code={} duration_ms={} error={}",
                    error_code(&err),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn run_sync(&self) -> SyncResult<SyncReport> {
        let fresh = self.fetch_fresh()?;
        let archived = self.archive.load()?;

        let outcome = merge_events(&archived, &fresh);
        let ordered = sort_events(&outcome.merged, SortKey::Datetime)?;
        self.archive.save(&ordered)?;

        Ok(SyncReport {
            fetched: fresh.len(),
            archived: archived.len(),
            duplicates: outcome.duplicates,
            total: ordered.len(),
        })
    }

    /// Fetches and decodes the current feed without touching the archive.
    pub fn fetch_fresh(&self) -> SyncResult<Vec<Event>> {
        let payload = self.source.fetch_raw()?;
        let events = decode_events(&payload).map_err(|err| {
            warn!(
                "event=feed_decode module=service status=error line={} column={}",
                err.line(),
                err.column()
            );
            err
        })?;
        Ok(events)
    }

    /// Archived corpus in chronological order.
    pub fn all_events(&self) -> SyncResult<Vec<Event>> {
        self.events_sorted_by(SortKey::Datetime)
    }

    /// Archived corpus ordered by `key`.
    pub fn events_sorted_by(&self, key: SortKey) -> SyncResult<Vec<Event>> {
        let events = self.archive.load()?;
        Ok(sort_events(&events, key)?)
    }

    /// Chronological events whose type matches `key`, ignoring case.
    pub fn subcategory_by_type(&self, key: &str) -> SyncResult<Vec<Event>> {
        Ok(filter_by(&self.all_events()?, SubcategoryKind::Type, key))
    }

    /// Chronological events whose location name matches `key`, ignoring case.
    pub fn subcategory_by_location(&self, key: &str) -> SyncResult<Vec<Event>> {
        Ok(filter_by(&self.all_events()?, SubcategoryKind::Location, key))
    }

    /// All subcategories of `kind`, each in chronological order.
    pub fn subcategories(&self, kind: SubcategoryKind) -> SyncResult<Vec<Subcategory>> {
        Ok(partition(&self.all_events()?, kind))
    }

    /// Archived event with `id`, if any.
    pub fn find_event(&self, id: EventId) -> SyncResult<Option<Event>> {
        Ok(self.archive.load()?.into_iter().find(|event| event.id == id))
    }

    /// Replaces the archive with `events`.
    ///
    /// # Errors
    /// - [`SyncError::DuplicateId`] when two events share an id; nothing is
    ///   written.
    /// - [`SyncError::TimeParse`] when an event has an unparsable timestamp;
    ///   nothing is written.
    /// - [`SyncError::Archive`] when the write fails.
    ///
    /// The corpus is stored in chronological order regardless of input order.
    pub fn persist(&self, events: &[Event]) -> SyncResult<()> {
        let mut seen = HashSet::with_capacity(events.len());
        if let Some(repeated) = events.iter().find(|event| !seen.insert(event.id)) {
            warn!(
                "event=persist module=service status=error error_code=duplicate_id id={}",
                repeated.id
            );
            return Err(SyncError::DuplicateId(repeated.id));
        }
        let ordered = sort_events(events, SortKey::Datetime)?;
        self.archive.save(&ordered)?;
        Ok(())
    }

    /// Absolute detail-page URL for `event`.
    pub fn detail_url(&self, event: &Event) -> String {
        resolve_detail_url(&self.detail_origin, &event.url)
    }
}

fn error_code(err: &SyncError) -> &'static str {
    match err {
        SyncError::Fetch(_) => "fetch_failed",
        SyncError::Decode(_) => "feed_malformed",
        SyncError::Archive(ArchiveError::Decode(_)) => "archive_corrupt",
        SyncError::Archive(archive) if archive.is_persistence() => "archive_write_failed",
        SyncError::Archive(_) => "archive_read_failed",
        SyncError::TimeParse(_) => "time_parse_failed",
        SyncError::DuplicateId(_) => "duplicate_id",
    }
}

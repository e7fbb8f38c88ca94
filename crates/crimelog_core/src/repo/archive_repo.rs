//! Archive repository contracts and JSON file implementation.
//!
//! # Responsibility
//! - Load and save the full event corpus as one JSON document.
//! - Keep file-system details inside the persistence boundary.
//!
//! # Invariants
//! - A missing archive loads as an empty corpus.
//! - A corrupt archive is an error, never an empty corpus.
//! - Save is a full replace: the document is written to a sibling temp file
//!   and renamed over the target, so readers see either the old or the new
//!   complete corpus.
//! - A failed save leaves the previous archive untouched.

use crate::codec::{decode_events, encode_events, DecodeError};
use crate::model::event::Event;
use log::{error, info};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// Mode of a newly created archive file on unix.
pub const DEFAULT_ARCHIVE_MODE: u32 = 0o644;

pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Repository error for archive load/save operations.
#[derive(Debug)]
pub enum ArchiveError {
    /// Archive exists but is not a valid corpus document.
    Decode(DecodeError),
    /// Archive exists but could not be read.
    Read { path: PathBuf, source: io::Error },
    /// Corpus could not be written; the previous archive is intact.
    Persistence { path: PathBuf, source: io::Error },
    /// Corpus could not be serialized; nothing was written.
    Encode(DecodeError),
}

impl Display for ArchiveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode(err) => write!(f, "corrupt archive: {err}"),
            Self::Read { path, source } => {
                write!(f, "failed to read archive `{}`: {source}", path.display())
            }
            Self::Persistence { path, source } => {
                write!(f, "failed to persist archive `{}`: {source}", path.display())
            }
            Self::Encode(err) => write!(f, "failed to encode archive: {err}"),
        }
    }
}

impl Error for ArchiveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Decode(err) => Some(err),
            Self::Read { source, .. } => Some(source),
            Self::Persistence { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
        }
    }
}

impl ArchiveError {
    /// Whether this failure happened while writing.
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence { .. } | Self::Encode(_))
    }
}

/// Durable storage contract for the reconciled corpus.
pub trait ArchiveRepository {
    /// Loads the full corpus; an absent archive yields an empty corpus.
    fn load(&self) -> ArchiveResult<Vec<Event>>;
    /// Replaces the stored corpus with `events`.
    fn save(&self, events: &[Event]) -> ArchiveResult<()>;
}

impl<T: ArchiveRepository + ?Sized> ArchiveRepository for &T {
    fn load(&self) -> ArchiveResult<Vec<Event>> {
        (**self).load()
    }

    fn save(&self, events: &[Event]) -> ArchiveResult<()> {
        (**self).save(events)
    }
}

/// JSON-file-backed archive.
#[derive(Debug, Clone)]
pub struct JsonFileArchive {
    path: PathBuf,
}

impl JsonFileArchive {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomically(&self, payload: &[u8]) -> io::Result<()> {
        let parent = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent)?;

        let mut staged = NamedTempFile::new_in(&parent)?;
        staged.write_all(payload)?;
        // Temp files are created 0600; keep the archive's existing mode.
        match std::fs::metadata(&self.path) {
            Ok(existing) => staged.as_file().set_permissions(existing.permissions())?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                set_default_permissions(staged.as_file())?
            }
            Err(err) => return Err(err),
        }
        staged.as_file().sync_all()?;
        staged.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

impl ArchiveRepository for JsonFileArchive {
    fn load(&self) -> ArchiveResult<Vec<Event>> {
        let started_at = Instant::now();
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(
                    "event=archive_load module=repo status=ok mode=bootstrap count=0 duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                return Ok(Vec::new());
            }
            Err(err) => {
                error!(
                    "event=archive_load module=repo status=error error_code=archive_read_failed error={}",
                    err
                );
                return Err(ArchiveError::Read {
                    path: self.path.clone(),
                    source: err,
                });
            }
        };

        match decode_events(&bytes) {
            Ok(events) => {
                info!(
                    "event=archive_load module=repo status=ok mode=file count={} bytes={} duration_ms={}",
                    events.len(),
                    bytes.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(events)
            }
            Err(err) => {
                error!(
                    "event=archive_load module=repo status=error error_code=archive_corrupt line={} column={}",
                    err.line(),
                    err.column()
                );
                Err(ArchiveError::Decode(err))
            }
        }
    }

    fn save(&self, events: &[Event]) -> ArchiveResult<()> {
        let started_at = Instant::now();
        let payload = encode_events(events).map_err(ArchiveError::Encode)?;

        match self.write_atomically(&payload) {
            Ok(()) => {
                info!(
                    "event=archive_save module=repo status=ok count={} bytes={} duration_ms={}",
                    events.len(),
                    payload.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=archive_save module=repo status=error error_code=archive_write_failed duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(ArchiveError::Persistence {
                    path: self.path.clone(),
                    source: err,
                })
            }
        }
    }
}

#[cfg(unix)]
fn set_default_permissions(file: &std::fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(DEFAULT_ARCHIVE_MODE))
}

#[cfg(not(unix))]
fn set_default_permissions(_file: &std::fs::File) -> io::Result<()> {
    Ok(())
}

/// In-process archive holding the encoded document.
///
/// Goes through the same codec as [`JsonFileArchive`], so corrupt documents
/// behave identically.
#[derive(Debug, Default)]
pub struct InMemoryArchive {
    document: RefCell<Option<Vec<u8>>>,
}

impl InMemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the archive with a raw document, valid or not.
    pub fn with_document(document: impl Into<Vec<u8>>) -> Self {
        Self {
            document: RefCell::new(Some(document.into())),
        }
    }

    /// Returns the currently stored raw document.
    pub fn document(&self) -> Option<Vec<u8>> {
        self.document.borrow().clone()
    }
}

impl ArchiveRepository for InMemoryArchive {
    fn load(&self) -> ArchiveResult<Vec<Event>> {
        match self.document.borrow().as_deref() {
            Some(bytes) => decode_events(bytes).map_err(ArchiveError::Decode),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, events: &[Event]) -> ArchiveResult<()> {
        let payload = encode_events(events).map_err(ArchiveError::Encode)?;
        *self.document.borrow_mut() = Some(payload);
        Ok(())
    }
}

//! JSON codec for event payloads.
//!
//! # Responsibility
//! - Decode feed responses and archive documents into `Event` sequences.
//! - Encode a corpus back into the archive document shape.
//!
//! # Invariants
//! - Both payloads are a bare JSON array of events; no envelope.
//! - Empty or whitespace-only input decodes to an empty corpus.
//! - Malformed input never yields a partial corpus.

use crate::model::event::Event;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DecodeResult<T> = Result<T, DecodeError>;

/// Payload is not a JSON array of event-shaped objects.
#[derive(Debug)]
pub struct DecodeError {
    source: serde_json::Error,
}

impl DecodeError {
    /// 1-based line of the failure inside the payload.
    pub fn line(&self) -> usize {
        self.source.line()
    }

    /// 1-based column of the failure inside the payload.
    pub fn column(&self) -> usize {
        self.source.column()
    }

    /// Whether the payload ended before a complete document was read.
    pub fn is_truncated(&self) -> bool {
        self.source.is_eof()
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed event payload: {}", self.source)
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(source: serde_json::Error) -> Self {
        Self { source }
    }
}

/// Decodes raw bytes into events, preserving payload order.
///
/// # Errors
/// - Returns [`DecodeError`] when the bytes are not a JSON array of events.
pub fn decode_events(bytes: &[u8]) -> DecodeResult<Vec<Event>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_slice(bytes)?)
}

/// Encodes a corpus as the archive document.
pub fn encode_events(events: &[Event]) -> DecodeResult<Vec<u8>> {
    Ok(serde_json::to_vec(events)?)
}

//! Remote feed access.
//!
//! # Responsibility
//! - Define the raw-bytes fetch contract consumed by the sync pipeline.
//! - Resolve an event's relative detail path against the source origin.
//!
//! # Invariants
//! - Fetchers return the response body untouched; decoding happens in
//!   [`crate::codec`].
//! - A non-success HTTP status is a fetch failure, not an empty payload.

mod http_source;

pub use http_source::HttpEventSource;

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type FetchResult<T> = Result<T, FetchError>;

/// Network or transport failure while retrieving the feed.
#[derive(Debug)]
pub enum FetchError {
    /// HTTP client could not be constructed.
    Client(reqwest::Error),
    /// Request did not complete (DNS, connect, TLS, timeout).
    Transport(reqwest::Error),
    /// Server answered with a non-success status.
    Status { url: String, status: u16 },
    /// Response body could not be read.
    Body(reqwest::Error),
}

impl FetchError {
    /// Whether the request was cut off by the configured timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Transport(err) | Self::Body(err) => err.is_timeout(),
            _ => false,
        }
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Client(err) => write!(f, "failed to build http client: {err}"),
            Self::Transport(err) => write!(f, "feed request failed: {err}"),
            Self::Status { url, status } => write!(f, "feed `{url}` answered with status {status}"),
            Self::Body(err) => write!(f, "failed to read feed body: {err}"),
        }
    }
}

impl Error for FetchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Client(err) | Self::Transport(err) | Self::Body(err) => Some(err),
            Self::Status { .. } => None,
        }
    }
}

/// Source of raw feed payloads.
pub trait EventSource {
    fn fetch_raw(&self) -> FetchResult<Vec<u8>>;
}

impl<T: EventSource + ?Sized> EventSource for &T {
    fn fetch_raw(&self) -> FetchResult<Vec<u8>> {
        (**self).fetch_raw()
    }
}

/// Joins the source origin with an event's relative detail path.
///
/// Exactly one `/` separates the two parts. Absolute `http(s)` paths are
/// returned unchanged.
pub fn resolve_detail_url(origin: &str, relative: &str) -> String {
    let relative = relative.trim();
    if relative.starts_with("http://") || relative.starts_with("https://") {
        return relative.to_string();
    }
    format!(
        "{}/{}",
        origin.trim().trim_end_matches('/'),
        relative.trim_start_matches('/')
    )
}

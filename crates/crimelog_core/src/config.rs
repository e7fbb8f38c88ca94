//! Core runtime configuration.
//!
//! # Responsibility
//! - Hold the source endpoints, archive location and fetch limits.
//! - Validate values before any network or file-system work starts.
//!
//! # Invariants
//! - `fetch_timeout` is always non-zero so a fetch can never hang the run.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SOURCE_URL: &str = "https://polisen.se/api/events";
pub const DEFAULT_DETAIL_ORIGIN: &str = "https://polisen.se/";
pub const DEFAULT_ARCHIVE_PATH: &str = "archive/archive.json";
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_USER_AGENT: &str = concat!("crimelog/", env!("CARGO_PKG_VERSION"));

/// Rejected configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidUrl { field: &'static str, value: String },
    ZeroTimeout,
    EmptyArchivePath,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidUrl { field, value } => {
                write!(f, "{field} must be an absolute http(s) URL, got `{value}`")
            }
            Self::ZeroTimeout => write!(f, "fetch_timeout must be greater than zero"),
            Self::EmptyArchivePath => write!(f, "archive_path cannot be empty"),
        }
    }
}

impl Error for ConfigError {}

/// Settings for one reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// Feed endpoint returning a JSON array of events.
    pub source_url: String,
    /// Origin prepended to an event's relative `url`.
    pub detail_origin: String,
    /// Location of the persisted corpus document.
    pub archive_path: PathBuf,
    pub fetch_timeout: Duration,
    pub user_agent: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            detail_origin: DEFAULT_DETAIL_ORIGIN.to_string(),
            archive_path: PathBuf::from(DEFAULT_ARCHIVE_PATH),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl CoreConfig {
    /// Checks every field.
    ///
    /// # Errors
    /// - Returns the first invalid field found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url("source_url", &self.source_url)?;
        validate_url("detail_origin", &self.detail_origin)?;
        if self.fetch_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.archive_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyArchivePath);
        }
        Ok(())
    }
}

fn validate_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !host.starts_with('/') => Ok(()),
        _ => Err(ConfigError::InvalidUrl {
            field,
            value: value.to_string(),
        }),
    }
}

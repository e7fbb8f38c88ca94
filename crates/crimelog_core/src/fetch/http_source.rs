//! Blocking HTTP implementation of [`EventSource`].

use super::{EventSource, FetchError, FetchResult};
use crate::config::CoreConfig;
use log::{error, info};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use std::time::{Duration, Instant};

/// Fetches the feed with a single bounded GET request.
///
/// The HTTP/TLS client is built on the first fetch, so constructing a source
/// never fails and costs nothing for callers that only read the archive.
#[derive(Debug, Clone)]
pub struct HttpEventSource {
    client: OnceCell<Client>,
    url: String,
    timeout: Duration,
    user_agent: String,
}

impl HttpEventSource {
    /// Creates a source for `url` with a hard request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration, user_agent: impl Into<String>) -> Self {
        Self {
            client: OnceCell::new(),
            url: url.into(),
            timeout,
            user_agent: user_agent.into(),
        }
    }

    /// Creates a source from the feed settings in `config`.
    pub fn from_config(config: &CoreConfig) -> Self {
        Self::new(
            config.source_url.as_str(),
            config.fetch_timeout,
            config.user_agent.as_str(),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether the HTTP client has been built yet.
    pub fn is_connected(&self) -> bool {
        self.client.get().is_some()
    }

    fn client(&self) -> FetchResult<&Client> {
        self.client.get_or_try_init(|| {
            Client::builder()
                .timeout(self.timeout)
                .connect_timeout(self.timeout)
                .user_agent(self.user_agent.as_str())
                .build()
                .map_err(FetchError::Client)
        })
    }
}

impl EventSource for HttpEventSource {
    fn fetch_raw(&self) -> FetchResult<Vec<u8>> {
        let started_at = Instant::now();
        info!("event=feed_fetch module=fetch status=start");

        let result = self
            .client()
            .and_then(|client| client.get(&self.url).send().map_err(FetchError::Transport))
            .and_then(|response| {
                let status = response.status();
                if !status.is_success() {
                    return Err(FetchError::Status {
                        url: self.url.clone(),
                        status: status.as_u16(),
                    });
                }
                response.bytes().map_err(FetchError::Body)
            });

        match result {
            Ok(body) => {
                info!(
                    "event=feed_fetch module=fetch status=ok bytes={} duration_ms={}",
                    body.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(body.to_vec())
            }
            Err(err) => {
                error!(
                    "event=feed_fetch module=fetch status=error timeout={} duration_ms={} error={}",
                    err.is_timeout(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}

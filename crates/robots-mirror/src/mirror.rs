//! Fetch-and-persist routine and the cache-or-fetch lookup built on it

use crate::error::{Result, ServeError};
use robots_upstream::{FetchOutcome, UpstreamClient};
use text_file_cache::TextFileCache;
use tracing::{debug, error, warn};

/// robots.txt content handed to a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Served {
    pub text: String,
    pub from_cache: bool,
}

/// Upstream client paired with the on-disk copy of its resource
pub struct RobotsMirror {
    upstream: UpstreamClient,
    cache: TextFileCache,
}

impl RobotsMirror {
    pub fn new(upstream: UpstreamClient, cache: TextFileCache) -> Self {
        Self { upstream, cache }
    }

    pub fn upstream(&self) -> &UpstreamClient {
        &self.upstream
    }

    pub fn cache(&self) -> &TextFileCache {
        &self.cache
    }

    /// GET the upstream file and, on 200, overwrite the cache with its body.
    ///
    /// A failed cache write is logged and does not fail the fetch.
    pub async fn fetch_and_persist(&self) -> Result<FetchOutcome> {
        let outcome = self.upstream.fetch().await?;

        if let Some(body) = outcome.body.as_deref() {
            if let Err(e) = self.cache.write(body).await {
                warn!(path = ?self.cache.path(), error = %e, "Failed to cache robots.txt");
            }
        }

        Ok(outcome)
    }

    /// Refresh the cache, discarding the outcome
    pub async fn refresh(&self) {
        match self.fetch_and_persist().await {
            Ok(outcome) => debug!(status = %outcome.status, "Refresh finished"),
            Err(e) => error!(url = %self.upstream.url(), error = %e, "Refresh failed"),
        }
    }

    /// Cached copy if there is one, otherwise a live fetch
    pub async fn robots_txt(&self) -> std::result::Result<Served, ServeError> {
        if let Some(text) = self.cache.read().await {
            return Ok(Served {
                text,
                from_cache: true,
            });
        }

        let outcome = self.fetch_and_persist().await.map_err(|e| {
            error!(url = %self.upstream.url(), error = %e, "Failed to fetch robots.txt");
            ServeError::BadGateway
        })?;

        if !outcome.has_content() {
            return Err(ServeError::Upstream(outcome.status));
        }

        Ok(Served {
            text: outcome.body.unwrap_or_default(),
            from_cache: false,
        })
    }
}

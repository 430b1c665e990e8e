//! HTTP client for the mirrored robots.txt

use crate::error::{Result, UpstreamError};
use crate::types::FetchOutcome;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("robots-mirror/", env!("CARGO_PKG_VERSION"));

/// Client bound to a single upstream URL
pub struct UpstreamClient {
    http: reqwest::Client,
    url: Url,
}

impl UpstreamClient {
    /// Create a client with the default 30 second timeout
    pub fn new(url: &str) -> Result<Self> {
        Self::with_timeout(url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with a custom timeout
    pub fn with_timeout(url: &str, timeout: Duration) -> Result<Self> {
        let url = parse_upstream_url(url)?;

        // Redirects are reported as their own status, never followed
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self { http, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// GET the upstream resource.
    ///
    /// Any status other than 200 yields an outcome without a body. Transport
    /// failures (connect, timeout, body read) are returned as errors.
    pub async fn fetch(&self) -> Result<FetchOutcome> {
        debug!(url = %self.url, "Fetching upstream robots.txt");

        let response = self.http.get(self.url.clone()).send().await?;
        let status = response.status();

        if status != StatusCode::OK {
            warn!(status = %status, url = %self.url, "Upstream returned non-200 status");
            return Ok(FetchOutcome::failed(status));
        }

        let body = response.text().await?;
        debug!(size = body.len(), "Fetched upstream robots.txt");

        Ok(FetchOutcome::ok(body))
    }
}

/// Parse and validate an upstream URL, only http and https are accepted
pub fn parse_upstream_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(UpstreamError::InvalidUrl(format!(
            "unsupported scheme '{}'",
            other
        ))),
    }
}

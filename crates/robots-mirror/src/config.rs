//! Service configuration from environment variables

use crate::error::{MirrorError, Result};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_UPSTREAM_URL: &str = "https://www.capterra.com/robots.txt";
pub const DEFAULT_CACHE_PATH: &str = "robots.txt";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Service configuration parsed from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct MirrorConfig {
    pub host: IpAddr,
    pub port: u16,
    pub upstream_url: String,
    pub cache_path: PathBuf,
    pub upstream_timeout_secs: u64,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            upstream_timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
        }
    }
}

impl MirrorConfig {
    /// Parse configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parse configuration from an arbitrary variable source.
    ///
    /// Unparsable numbers and addresses fall back to their defaults; an
    /// upstream URL that is not http(s) is rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("HOST")
            .and_then(|s| s.parse::<IpAddr>().ok())
            .unwrap_or(defaults.host);

        let port = lookup("PORT")
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(defaults.port);

        let upstream_url = lookup("UPSTREAM_URL").unwrap_or(defaults.upstream_url);
        robots_upstream::parse_upstream_url(&upstream_url)
            .map_err(|e| MirrorError::Config(format!("UPSTREAM_URL: {}", e)))?;

        let cache_path = lookup("CACHE_PATH")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.cache_path);

        let upstream_timeout_secs = lookup("UPSTREAM_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(defaults.upstream_timeout_secs);

        Ok(Self {
            host,
            port,
            upstream_url,
            cache_path,
            upstream_timeout_secs,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

//! Upstream robots.txt client
//!
//! Fetches one fixed text resource over HTTP and reports the upstream
//! status alongside the body. Nothing here touches the disk.

pub mod client;
pub mod error;
pub mod types;

pub use client::{parse_upstream_url, UpstreamClient};
pub use error::{Result, UpstreamError};
pub use types::FetchOutcome;

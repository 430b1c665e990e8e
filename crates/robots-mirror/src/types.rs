//! Response bodies for the mirror's HTTP endpoints

use serde::Serialize;
use text_file_cache::CacheStats;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
    pub upstream: String,
    pub cache: CacheStats,
}

/// Error body returned when the mirrored file cannot be produced
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

//! robots-mirror - serves a disk-cached copy of a remote robots.txt
//!
//! `GET /` refreshes the cached copy, `GET /robots` serves it as HTML and
//! falls back to a live fetch when nothing is cached yet.

use robots_mirror::{
    start_server, MirrorConfig, MirrorError, Result, RobotsMirror, ServerState, SharedState,
};
use robots_upstream::UpstreamClient;
use std::sync::Arc;
use std::time::Duration;
use text_file_cache::TextFileCache;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let env_filter = EnvFilter::from_default_env().add_directive("robots_mirror=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    info!("Starting robots-mirror...");

    let config = MirrorConfig::from_env()?;
    info!("Bind address: {}", config.bind_addr());
    info!("Upstream: {}", config.upstream_url);
    info!("Cache file: {:?}", config.cache_path);

    let upstream = UpstreamClient::with_timeout(
        &config.upstream_url,
        Duration::from_secs(config.upstream_timeout_secs),
    )?;

    let cache = TextFileCache::new(config.cache_path.clone());
    cache.init().await?;

    let state: SharedState = Arc::new(ServerState::new(RobotsMirror::new(upstream, cache)));

    // Start HTTP server (blocking)
    start_server(state, config.bind_addr())
        .await
        .map_err(|e| MirrorError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

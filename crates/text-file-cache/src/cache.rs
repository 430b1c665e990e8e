//! File-backed single-slot text cache

use crate::types::CacheStats;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// A cache holding one text file at a fixed path
pub struct TextFileCache {
    /// Location of the cached file
    path: PathBuf,
    /// Serializes overwrites; reads do not take it
    write_lock: Mutex<()>,
    /// Cache hit counter
    hits: AtomicU64,
    /// Cache miss counter
    misses: AtomicU64,
    /// Successful write counter
    writes: AtomicU64,
}

impl TextFileCache {
    /// Create a cache backed by `path`. Nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            writes: AtomicU64::new(0),
        }
    }

    /// Ensure the parent directory of the cache file exists
    pub async fn init(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        info!(path = ?self.path, "Cache initialized");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cached text.
    ///
    /// Returns `None` when the file is absent or cannot be read as UTF-8;
    /// the latter is logged and counted as a miss.
    pub async fn read(&self) -> Option<String> {
        match fs::read_to_string(&self.path).await {
            Ok(text) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(path = ?self.path, size = text.len(), "Cache hit");
                Some(text)
            }
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    warn!(path = ?self.path, error = %e, "Failed to read cached file");
                }
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Replace the cached text.
    ///
    /// The content goes to a sibling temp file first and is renamed over
    /// the cache path. Concurrent writers are serialized; the last one wins.
    pub async fn write(&self, text: &str) -> std::io::Result<()> {
        let _guard = self.write_lock.lock().await;

        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, text).await?;
        if let Err(e) = fs::rename(&tmp_path, &self.path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e);
        }

        self.writes.fetch_add(1, Ordering::Relaxed);
        info!(path = ?self.path, size = text.len(), "Cached file written");
        Ok(())
    }

    /// Get current cache statistics
    pub async fn stats(&self) -> CacheStats {
        let metadata = fs::metadata(&self.path).await.ok().filter(|m| m.is_file());
        CacheStats {
            present: metadata.is_some(),
            size: metadata.map(|m| m.len()).unwrap_or(0),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name: OsString = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

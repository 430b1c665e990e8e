//! Cache types

use serde::{Deserialize, Serialize};

/// Statistics about the cache slot
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheStats {
    pub present: bool,
    pub size: u64,
    pub hits: u64,
    pub misses: u64,
    pub writes: u64,
}

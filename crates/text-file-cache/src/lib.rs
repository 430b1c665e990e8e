//! Single-slot on-disk text cache
//!
//! Holds exactly one text file at a fixed path. There is no expiry and no
//! eviction: the file is present or it is not. Overwrites are serialized
//! and land through a rename so readers never see a partial file.

mod cache;
mod types;

pub use cache::TextFileCache;
pub use types::CacheStats;

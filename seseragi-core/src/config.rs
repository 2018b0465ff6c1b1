//! # Configuration
//!
//! Configuration for the streams record cache.

use serde::{Deserialize, Serialize};

/// Streams record cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Upper bound on the summed upstream byte size of all cached records.
    /// When exceeded, segments are evicted in FIFO insertion order until
    /// the bound holds again.
    pub max_records_byte_size: u64,
    /// Number of reader/writer lock stripes the shard space is hashed
    /// across. Must be a power of two.
    pub lock_stripes: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_records_byte_size: 256 * 1024 * 1024, // 256MB
            lock_stripes: 1024,
        }
    }
}

//! # Seseragi Core
//!
//! This crate provides the fundamental building blocks for Seseragi:
//! - Core data structures (sequence numbers, shard ids, records)
//! - Error types
//! - Cache configuration
//! - Metrics collection
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 seseragi-core                   │
//! ├─────────────────────────────────────────────────┤
//! │  • types      - Shards, positions, records      │
//! │  • error      - Error handling                  │
//! │  • config     - Cache configuration             │
//! │  • metrics    - Counters and snapshots          │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod types;

// Re-export commonly used types
pub use config::CacheConfig;
pub use error::{Error, Result};
pub use metrics::{Metrics, MetricsSnapshot};
pub use types::{SequenceNumber, ShardId, ShardIteratorPosition, StreamRecord};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

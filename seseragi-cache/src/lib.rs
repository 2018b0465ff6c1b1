//! # Seseragi Streams Record Cache
//!
//! Size-bounded, concurrent, in-memory cache that accelerates sequential
//! reads across the change-data streams of a sharded, multi-tenant data
//! store. Consumers iterate a shard by repeatedly asking "starting at
//! sequence number s in shard S, give me up to N records"; the cache
//! answers out of cached segments so the expensive, rate-limited upstream
//! stream API is only consulted for gaps.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     StreamsRecordCache                        │
//! │                                                               │
//! │  get/put(shard, seq)                                          │
//! │        │ hash(shard)                                          │
//! │        ▼                                                      │
//! │  ┌──────────┐ ┌──────────┐       ┌──────────┐                │
//! │  │ Stripe 0 │ │ Stripe 1 │  ...  │ Stripe N │  RwLock each   │
//! │  └────┬─────┘ └──────────┘       └──────────┘                │
//! │       │ owns                                                  │
//! │       ▼                                                       │
//! │  ShardIndex: start ──> Segment [start, end) + records         │
//! │                                                               │
//! │  InsertionLog (lock-free FIFO) ──> evict() oldest-first       │
//! │  records_byte_size (atomic)    ──> until <= configured max    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reads take the shard's stripe read lock, anchor on the floor segment
//! and stitch across adjacent segments until the limit or a gap. Writes
//! take the write lock, trim the incoming batch against its neighbours
//! (never merging), insert, and then run FIFO eviction. The cache stores
//! what callers hand it; it never fetches, never prefetches, and a gap
//! simply means "ask the upstream".

pub mod cache;
pub mod index;
pub mod log;
pub mod segment;
pub mod shards;

#[cfg(test)]
mod proptests;

pub use cache::{CacheStats, StreamsRecordCache};
pub use segment::Segment;

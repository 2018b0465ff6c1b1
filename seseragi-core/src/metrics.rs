//! # Metrics and Monitoring
//!
//! Metrics collection for the streams record cache. Counters are plain
//! atomics behind a shared handle so one collector can be wired into
//! several components.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics collector
#[derive(Clone, Default)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

#[derive(Default)]
struct MetricsInner {
    // Read metrics
    lookups: AtomicU64,
    records_returned: AtomicU64,

    // Write metrics
    inserts: AtomicU64,
    records_received: AtomicU64,
    records_cached: AtomicU64,

    // Eviction metrics
    segments_evicted: AtomicU64,
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cache lookup and the number of records it returned.
    ///
    /// The returned count relative to the requested limit approximates the
    /// cache hit rate for sequential consumers.
    pub fn record_lookup(&self, records_returned: u64) {
        self.inner.lookups.fetch_add(1, Ordering::Relaxed);
        self.inner
            .records_returned
            .fetch_add(records_returned, Ordering::Relaxed);
    }

    /// Record an insert: how many records the caller handed over and how
    /// many survived overlap trimming
    pub fn record_insert(&self, records_received: u64, records_cached: u64) {
        self.inner.inserts.fetch_add(1, Ordering::Relaxed);
        self.inner
            .records_received
            .fetch_add(records_received, Ordering::Relaxed);
        self.inner
            .records_cached
            .fetch_add(records_cached, Ordering::Relaxed);
    }

    /// Record evicted segments
    pub fn record_evictions(&self, segments: u64) {
        self.inner
            .segments_evicted
            .fetch_add(segments, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            lookups: self.inner.lookups.load(Ordering::Relaxed),
            records_returned: self.inner.records_returned.load(Ordering::Relaxed),
            inserts: self.inner.inserts.load(Ordering::Relaxed),
            records_received: self.inner.records_received.load(Ordering::Relaxed),
            records_cached: self.inner.records_cached.load(Ordering::Relaxed),
            segments_evicted: self.inner.segments_evicted.load(Ordering::Relaxed),
        }
    }
}

/// Metrics snapshot
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub lookups: u64,
    pub records_returned: u64,
    pub inserts: u64,
    pub records_received: u64,
    pub records_cached: u64,
    pub segments_evicted: u64,
}

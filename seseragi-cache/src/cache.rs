//! Streams record cache facade.
//!
//! Serves "give me up to N records starting at sequence number s in shard
//! S" requests by stitching cached segments together, and absorbs new
//! batches by trimming them against their cached neighbours. A FIFO
//! eviction loop keeps the summed upstream byte size of all cached records
//! under the configured bound.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use seseragi_core::{
    CacheConfig, Error, Metrics, Result, SequenceNumber, ShardIteratorPosition, StreamRecord,
};

use crate::index::ShardIndex;
use crate::log::InsertionLog;
use crate::segment::Segment;
use crate::shards::ShardTable;

/// Size-bounded concurrent cache of stream records.
///
/// One instance caches records for any number of streams and shards.
/// Reads and writes to the same shard serialize on that shard's stripe
/// lock; operations on unrelated shards proceed in parallel. The size
/// bound counts upstream-reported record bytes, not in-memory bytes.
pub struct StreamsRecordCache {
    config: CacheConfig,
    shards: ShardTable,
    insertion_log: InsertionLog,
    records_byte_size: AtomicU64,
    metrics: Metrics,
}

/// Point-in-time cache statistics
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub shards: usize,
    pub segments: usize,
    pub records_byte_size: u64,
}

impl StreamsRecordCache {
    /// Create a cache with a fresh metrics collector
    pub fn new(config: CacheConfig) -> Self {
        Self::with_metrics(config, Metrics::new())
    }

    /// Create a cache reporting into a shared metrics collector.
    ///
    /// Panics if `config.lock_stripes` is not a power of two.
    pub fn with_metrics(config: CacheConfig, metrics: Metrics) -> Self {
        let shards = ShardTable::new(config.lock_stripes);
        Self {
            config,
            shards,
            insertion_log: InsertionLog::new(),
            records_byte_size: AtomicU64::new(0),
            metrics,
        }
    }

    /// Returns up to `limit` consecutive cached records starting at the
    /// given position.
    ///
    /// Records come back in strictly ascending sequence-number order, all
    /// at or above the requested position. The scan runs across adjacent
    /// segments and stops at the first gap; a result shorter than `limit`
    /// therefore means "coverage ran out", and the caller decides whether
    /// the upstream has more. Pure read: no index mutation, no eviction.
    pub fn get_records(
        &self,
        position: &ShardIteratorPosition,
        limit: usize,
    ) -> Result<Vec<StreamRecord>> {
        if limit == 0 {
            return Err(Error::invalid_argument("limit must be positive"));
        }

        let records = {
            let stripe = self.shards.stripe(&position.shard_id);
            let map = stripe.read();
            match map.get(&position.shard_id) {
                Some(index) => Self::collect_adjacent(index, &position.sequence_number, limit),
                None => Vec::new(),
            }
        };

        self.metrics.record_lookup(records.len() as u64);
        Ok(records)
    }

    // must be called with the shard's stripe read-locked
    fn collect_adjacent(
        index: &ShardIndex,
        from: &SequenceNumber,
        limit: usize,
    ) -> Vec<StreamRecord> {
        let Some(first) = index.floor(from) else {
            // no segment at or below the requested sequence number
            return Vec::new();
        };
        if first.end() <= from {
            // the preceding segment ends before the request; nothing is
            // cached for this position
            return Vec::new();
        }

        let mut records = Vec::new();
        extend_up_to(&mut records, first.records_from(from), limit);

        // follow segments that start exactly where the previous one ended
        let mut end = first.end();
        while records.len() < limit {
            match index.get(end) {
                Some(next) => {
                    extend_up_to(&mut records, next.records(), limit);
                    end = next.end();
                }
                None => break,
            }
        }

        records
    }

    /// Caches a batch of records read from a shard at the given position.
    ///
    /// The batch must be non-empty and correspond to the shard starting at
    /// `position.sequence_number`. Records whose range is already covered
    /// by cached neighbours are trimmed away; re-inserting an exactly
    /// covered batch is a no-op. Runs the eviction loop after releasing
    /// the shard lock.
    pub fn put_records(
        &self,
        position: &ShardIteratorPosition,
        records: Vec<StreamRecord>,
    ) -> Result<()> {
        if records.is_empty() {
            return Err(Error::invalid_argument("records must be non-empty"));
        }

        let received = records.len() as u64;
        let candidate = Segment::new(position.sequence_number.clone(), records);
        let shard_id = &position.shard_id;

        let cached = {
            let stripe = self.shards.stripe(shard_id);
            let mut map = stripe.write();
            let index = map.entry(shard_id.clone()).or_default();

            // bound the candidate by its neighbours so no cached range is
            // ever covered twice
            let lower = index
                .floor(&position.sequence_number)
                .map(|s| s.end().clone());
            let upper = index
                .higher(&position.sequence_number)
                .map(|s| s.start().clone());
            let trimmed = candidate.sub_segment(lower.as_ref(), upper.as_ref());

            if trimmed.is_empty() {
                0
            } else {
                if index.get(trimmed.start()).is_some() {
                    return Err(Error::internal(format!(
                        "segment already cached at {}@{}",
                        shard_id,
                        trimmed.start()
                    )));
                }

                let start = trimmed.start().clone();
                let byte_size = trimmed.byte_size();
                let cached = trimmed.records().len() as u64;

                index.insert(trimmed);
                self.insertion_log.push(shard_id.clone(), start.clone());
                self.records_byte_size.fetch_add(byte_size, Ordering::Relaxed);

                debug!(
                    "cached segment {}@{} ({} records, {} bytes)",
                    shard_id, start, cached, byte_size
                );
                cached
            }
        };

        self.metrics.record_insert(received, cached);
        self.evict();
        Ok(())
    }

    /// Evicts segments in FIFO insertion order until the cached byte size
    /// is within the configured bound.
    ///
    /// Multiple threads may evict concurrently; a popped entry whose
    /// segment is already gone is a benign race and is skipped.
    fn evict(&self) {
        let max = self.config.max_records_byte_size;
        let mut evicted_segments = 0u64;
        let mut evicted_bytes = 0u64;

        while self.records_byte_size.load(Ordering::Relaxed) > max {
            // an empty log means concurrent evictors got there first; the
            // size is re-checked on the next insert
            let Some((shard_id, start)) = self.insertion_log.pop() else {
                break;
            };

            let stripe = self.shards.stripe(&shard_id);
            let mut map = stripe.write();
            let mut shard_emptied = false;
            if let Some(index) = map.get_mut(&shard_id) {
                if let Some(segment) = index.remove(&start) {
                    self.records_byte_size
                        .fetch_sub(segment.byte_size(), Ordering::Relaxed);
                    evicted_segments += 1;
                    evicted_bytes += segment.byte_size();
                    shard_emptied = index.is_empty();
                } else {
                    debug!("segment {}@{} evicted concurrently", shard_id, start);
                }
            } else {
                debug!("shard {} emptied concurrently", shard_id);
            }
            if shard_emptied {
                map.remove(&shard_id);
            }
        }

        if evicted_segments > 0 {
            self.metrics.record_evictions(evicted_segments);
            debug!(
                "evicted {} segments ({} bytes)",
                evicted_segments, evicted_bytes
            );
        }
    }

    /// Summed upstream byte size of all cached records
    pub fn records_byte_size(&self) -> u64 {
        self.records_byte_size.load(Ordering::Relaxed)
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let (shards, segments) = self.shards.counts();
        CacheStats {
            shards,
            segments,
            records_byte_size: self.records_byte_size(),
        }
    }

    /// The metrics collector this cache reports into
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    #[cfg(test)]
    pub(crate) fn shard_table(&self) -> &ShardTable {
        &self.shards
    }

    #[cfg(test)]
    pub(crate) fn insertion_log_len(&self) -> usize {
        self.insertion_log.len()
    }
}

fn extend_up_to(records: &mut Vec<StreamRecord>, source: &[StreamRecord], limit: usize) {
    debug_assert!(records.len() <= limit);
    let remaining = limit - records.len();
    records.extend(source.iter().take(remaining).cloned());
}

//! Property-Based Tests for the Streams Record Cache
//!
//! Systematically verifies the cache's structural invariants across
//! randomized insert/read workloads:
//!
//! 1. **No overlap**: segments of a shard never cover a range twice
//! 2. **Size accounting**: the byte counter equals the sum over all segments
//! 3. **Bounded size**: after a put returns, the counter respects the
//!    configured bound (or the insertion log is empty)
//! 4. **Read guarantees**: results are strictly ascending, at or above the
//!    requested position, and never longer than the limit
//! 5. **Idempotence**: re-inserting covered records changes nothing

use bytes::Bytes;
use proptest::prelude::*;

use seseragi_core::{CacheConfig, SequenceNumber, ShardId, ShardIteratorPosition, StreamRecord};

use crate::cache::StreamsRecordCache;

/// (shard pick, start, record count, per-record upstream bytes)
type PutOp = (usize, u64, usize, u64);

fn put_op_strategy() -> impl Strategy<Value = PutOp> {
    (0..4usize, 0..200u64, 1..8usize, 1..64u64)
}

fn get_op_strategy() -> impl Strategy<Value = (usize, u64, usize)> {
    (0..4usize, 0..220u64, 1..32usize)
}

fn shard_id(pick: usize) -> ShardId {
    ShardId::new("stream-prop", format!("shard-{pick:04}"))
}

fn batch(start: u64, count: usize, byte_size: u64) -> Vec<StreamRecord> {
    (start..start + count as u64)
        .map(|s| {
            StreamRecord::new(
                SequenceNumber::from(s),
                Bytes::from_static(b"record-payload"),
                byte_size,
            )
        })
        .collect()
}

fn apply_puts(cache: &StreamsRecordCache, ops: &[PutOp]) {
    for &(pick, start, count, byte_size) in ops {
        let position = ShardIteratorPosition::new(shard_id(pick), SequenceNumber::from(start));
        cache
            .put_records(&position, batch(start, count, byte_size))
            .unwrap();
    }
}

/// Walks every shard index and checks the structural invariants; returns
/// the summed byte size of all resident segments.
fn checked_total_bytes(cache: &StreamsRecordCache) -> u64 {
    let mut total = 0u64;
    cache.shard_table().for_each_shard(|shard_id, index| {
        let mut prev_end: Option<SequenceNumber> = None;
        for segment in index.segments() {
            assert!(
                segment.start() <= segment.end(),
                "inverted segment in {shard_id}"
            );
            if let Some(prev) = &prev_end {
                assert!(
                    prev <= segment.start(),
                    "overlapping segments in {shard_id}: previous ends at {prev}, next starts at {}",
                    segment.start()
                );
            }

            let mut prev_seq: Option<&SequenceNumber> = None;
            let mut record_bytes = 0u64;
            for record in segment.records() {
                assert!(
                    segment.start() <= &record.sequence_number
                        && &record.sequence_number < segment.end(),
                    "record outside its segment in {shard_id}"
                );
                if let Some(prev) = prev_seq {
                    assert!(prev < &record.sequence_number, "records out of order");
                }
                prev_seq = Some(&record.sequence_number);
                record_bytes += record.byte_size;
            }
            assert_eq!(record_bytes, segment.byte_size(), "stale segment byte size");

            total += segment.byte_size();
            prev_end = Some(segment.end().clone());
        }
    });
    total
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: after any insert workload, no shard covers a range twice
    /// and the byte counter matches the resident segments exactly.
    #[test]
    fn prop_no_overlap_and_exact_accounting(ops in prop::collection::vec(put_op_strategy(), 1..40)) {
        let cache = StreamsRecordCache::new(CacheConfig {
            max_records_byte_size: u64::MAX, // no eviction in this property
            lock_stripes: 16,
        });
        apply_puts(&cache, &ops);

        let total = checked_total_bytes(&cache);
        prop_assert_eq!(total, cache.records_byte_size());
    }

    /// Property: the byte counter respects the configured bound once a put
    /// returns, unless eviction drained the insertion log entirely.
    #[test]
    fn prop_bounded_size(
        ops in prop::collection::vec(put_op_strategy(), 1..40),
        max in 1u64..4096,
    ) {
        let cache = StreamsRecordCache::new(CacheConfig {
            max_records_byte_size: max,
            lock_stripes: 16,
        });
        apply_puts(&cache, &ops);

        prop_assert!(
            cache.records_byte_size() <= max || cache.insertion_log_len() == 0,
            "size {} exceeds bound {} with a non-empty insertion log",
            cache.records_byte_size(),
            max
        );
        // accounting stays exact even under eviction pressure
        prop_assert_eq!(checked_total_bytes(&cache), cache.records_byte_size());
    }

    /// Property: every read is strictly ascending, starts at or after the
    /// requested position, and never exceeds the limit.
    #[test]
    fn prop_read_guarantees(
        ops in prop::collection::vec(put_op_strategy(), 1..30),
        gets in prop::collection::vec(get_op_strategy(), 1..20),
    ) {
        let cache = StreamsRecordCache::new(CacheConfig {
            max_records_byte_size: u64::MAX,
            lock_stripes: 16,
        });
        apply_puts(&cache, &ops);

        for (pick, from, limit) in gets {
            let position = ShardIteratorPosition::new(shard_id(pick), SequenceNumber::from(from));
            let records = cache.get_records(&position, limit).unwrap();

            prop_assert!(records.len() <= limit);
            let mut prev: Option<&SequenceNumber> = None;
            for record in &records {
                prop_assert!(record.sequence_number >= position.sequence_number);
                if let Some(prev) = prev {
                    prop_assert!(prev < &record.sequence_number);
                }
                prev = Some(&record.sequence_number);
            }
        }
    }

    /// Property: inserting a batch and reading it back from its first
    /// sequence number returns the batch unchanged (pre-eviction).
    #[test]
    fn prop_roundtrip(start in 0u64..1000, count in 1usize..32, byte_size in 1u64..128) {
        let cache = StreamsRecordCache::new(CacheConfig {
            max_records_byte_size: u64::MAX,
            lock_stripes: 16,
        });
        let records = batch(start, count, byte_size);
        let position = ShardIteratorPosition::new(shard_id(0), SequenceNumber::from(start));

        cache.put_records(&position, records.clone()).unwrap();
        let read_back = cache.get_records(&position, count).unwrap();

        prop_assert_eq!(read_back, records);
    }

    /// Property: re-inserting an exactly covered batch is a no-op.
    #[test]
    fn prop_reinsert_is_noop(start in 0u64..1000, count in 1usize..32, byte_size in 1u64..128) {
        let cache = StreamsRecordCache::new(CacheConfig {
            max_records_byte_size: u64::MAX,
            lock_stripes: 16,
        });
        let records = batch(start, count, byte_size);
        let position = ShardIteratorPosition::new(shard_id(0), SequenceNumber::from(start));

        cache.put_records(&position, records.clone()).unwrap();
        let bytes_before = cache.records_byte_size();
        let stats_before = cache.stats();

        cache.put_records(&position, records).unwrap();

        prop_assert_eq!(cache.records_byte_size(), bytes_before);
        let stats_after = cache.stats();
        prop_assert_eq!(stats_after.segments, stats_before.segments);
        prop_assert_eq!(stats_after.shards, stats_before.shards);
    }
}

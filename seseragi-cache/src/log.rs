//! Insertion-order eviction log.
//!
//! Lock-free FIFO of `(shard, segment start)` pairs, appended by insert
//! paths holding a shard write lock and drained by evictors. The queue
//! itself is never locked. An entry can outlive its segment when shard
//! cleanup races an evictor, so consumers must tolerate pops that no
//! longer resolve to a live segment.

use crossbeam_queue::SegQueue;

use seseragi_core::{SequenceNumber, ShardId};

/// FIFO identifying cached segments in insertion order
#[derive(Debug, Default)]
pub struct InsertionLog {
    entries: SegQueue<(ShardId, SequenceNumber)>,
}

impl InsertionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the identity of a freshly inserted segment
    pub fn push(&self, shard_id: ShardId, start: SequenceNumber) {
        self.entries.push((shard_id, start));
    }

    /// Remove and return the oldest entry, if any
    pub fn pop(&self) -> Option<(ShardId, SequenceNumber)> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Per-shard segment index.
//!
//! Ordered map from segment start to segment. Lookups that anchor a read
//! (`floor`) or trim an insert (`floor`/`higher`) are all O(log n).
//! The index itself is not synchronized; the owning stripe's lock is.

use std::collections::BTreeMap;
use std::ops::Bound;

use seseragi_core::SequenceNumber;

use crate::segment::Segment;

/// Segments of one shard, keyed by starting sequence number.
///
/// Invariant: no two segments overlap. Adjacency (`a.end == b.start`) is
/// allowed and is what read-side stitching exploits.
#[derive(Debug, Default)]
pub struct ShardIndex {
    segments: BTreeMap<SequenceNumber, Segment>,
}

impl ShardIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// The segment with the largest start <= the given sequence number
    pub fn floor(&self, sequence_number: &SequenceNumber) -> Option<&Segment> {
        self.segments
            .range((Bound::Unbounded, Bound::Included(sequence_number)))
            .next_back()
            .map(|(_, segment)| segment)
    }

    /// The segment with the smallest start > the given sequence number
    pub fn higher(&self, sequence_number: &SequenceNumber) -> Option<&Segment> {
        self.segments
            .range((Bound::Excluded(sequence_number), Bound::Unbounded))
            .next()
            .map(|(_, segment)| segment)
    }

    /// The segment starting exactly at the given sequence number
    pub fn get(&self, start: &SequenceNumber) -> Option<&Segment> {
        self.segments.get(start)
    }

    /// Inserts a segment under its start key, returning any displaced
    /// segment. With the no-overlap invariant intact nothing is ever
    /// displaced.
    pub fn insert(&mut self, segment: Segment) -> Option<Segment> {
        self.segments.insert(segment.start().clone(), segment)
    }

    /// Removes the segment starting at the given sequence number
    pub fn remove(&mut self, start: &SequenceNumber) -> Option<Segment> {
        self.segments.remove(start)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments in ascending start order
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.values()
    }
}

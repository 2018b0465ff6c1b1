//! # Core Types
//!
//! Fundamental data structures shared by the Seseragi crates.
//!
//! ## Type Design Philosophy
//!
//! 1. **Cheap to clone**: shard ids and payloads are refcounted
//! 2. **Type safety**: sequence numbers are a dedicated ordered type
//! 3. **Upstream fidelity**: record sizes are the stream-reported sizes,
//!    not in-memory sizes

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use bytes::Bytes;
use num_bigint::BigUint;

use crate::error::Error;

/// Position within a shard's totally ordered sequence-number space.
///
/// Stream sequence numbers are arbitrarily large non-negative integers;
/// they do not fit any fixed-width machine integer.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SequenceNumber(BigUint);

impl SequenceNumber {
    pub fn new(value: BigUint) -> Self {
        Self(value)
    }

    /// The immediately following sequence number
    pub fn next(&self) -> Self {
        Self(&self.0 + 1u32)
    }
}

impl From<u64> for SequenceNumber {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<BigUint> for SequenceNumber {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl FromStr for SequenceNumber {
    type Err = Error;

    /// Parses the decimal representation used by the stream API
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = BigUint::from_str(s)
            .map_err(|e| Error::invalid_argument(format!("sequence number {s:?}: {e}")))?;
        Ok(Self(value))
    }
}

impl fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies one shard of one tenant stream.
///
/// Opaque token: the cache only hashes and compares it. Both components
/// are refcounted so ids can be cloned freely on hot paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShardId {
    pub stream: Arc<str>,
    pub shard: Arc<str>,
}

impl ShardId {
    pub fn new(stream: impl Into<Arc<str>>, shard: impl Into<Arc<str>>) -> Self {
        Self {
            stream: stream.into(),
            shard: shard.into(),
        }
    }
}

impl fmt::Display for ShardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.stream, self.shard)
    }
}

/// A point in a shard: the pair of shard id and sequence number
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShardIteratorPosition {
    pub shard_id: ShardId,
    pub sequence_number: SequenceNumber,
}

impl ShardIteratorPosition {
    pub fn new(shard_id: ShardId, sequence_number: SequenceNumber) -> Self {
        Self {
            shard_id,
            sequence_number,
        }
    }

    /// The position in the same shard immediately after the given record.
    ///
    /// Consumers use this to continue a scan from the last record a read
    /// returned.
    pub fn after(&self, record: &StreamRecord) -> Self {
        Self {
            shard_id: self.shard_id.clone(),
            sequence_number: record.sequence_number.next(),
        }
    }
}

impl fmt::Display for ShardIteratorPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.shard_id, self.sequence_number)
    }
}

/// A single change record from a stream shard.
///
/// The payload is opaque to the cache. `byte_size` is the size reported by
/// the upstream stream and is the unit the cache budget is accounted in;
/// the in-memory footprint is larger by a constant factor and irrelevant.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamRecord {
    pub sequence_number: SequenceNumber,
    pub payload: Bytes,
    pub byte_size: u64,
}

impl StreamRecord {
    pub fn new(sequence_number: SequenceNumber, payload: Bytes, byte_size: u64) -> Self {
        Self {
            sequence_number,
            payload,
            byte_size,
        }
    }

    /// Convenience constructor that takes the payload length as the size
    pub fn from_payload(sequence_number: SequenceNumber, payload: Bytes) -> Self {
        let byte_size = payload.len() as u64;
        Self::new(sequence_number, payload, byte_size)
    }
}

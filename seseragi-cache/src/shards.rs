//! Striped shard table.
//!
//! Shard ids are hashed into a fixed pool of reader/writer stripes; each
//! stripe's lock owns the indices of every shard dispatching to it. Two
//! unrelated shards sharing a stripe only cost each other wait time, never
//! correctness, and the stripe for a given id never changes.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use parking_lot::RwLock;

use seseragi_core::ShardId;

use crate::index::ShardIndex;

/// The shard indices guarded by one stripe lock
pub type ShardMap = HashMap<ShardId, ShardIndex>;

/// Fixed pool of reader/writer-locked shard maps
pub struct ShardTable {
    stripes: Box<[RwLock<ShardMap>]>,
    stripe_mask: usize,
}

impl ShardTable {
    /// Create a table with the given stripe count (must be a power of 2)
    pub fn new(stripe_count: usize) -> Self {
        assert!(
            stripe_count.is_power_of_two(),
            "stripe count must be a power of 2"
        );

        let stripes: Vec<_> = (0..stripe_count).map(|_| RwLock::new(ShardMap::new())).collect();

        Self {
            stripes: stripes.into_boxed_slice(),
            stripe_mask: stripe_count - 1,
        }
    }

    /// The stripe a shard id dispatches to; stable across calls
    #[inline]
    pub fn stripe(&self, shard_id: &ShardId) -> &RwLock<ShardMap> {
        let mut hasher = DefaultHasher::new();
        shard_id.hash(&mut hasher);
        let idx = (hasher.finish() as usize) & self.stripe_mask;
        &self.stripes[idx]
    }

    pub fn stripe_count(&self) -> usize {
        self.stripes.len()
    }

    /// Visits every shard index under its stripe's read lock
    #[cfg(test)]
    pub(crate) fn for_each_shard(&self, mut f: impl FnMut(&ShardId, &ShardIndex)) {
        for stripe in self.stripes.iter() {
            let map = stripe.read();
            for (shard_id, index) in map.iter() {
                f(shard_id, index);
            }
        }
    }

    /// Counts shards and segments across all stripes.
    ///
    /// Read-locks each stripe in turn; the result is a point-in-time view
    /// per stripe, not a global snapshot.
    pub fn counts(&self) -> (usize, usize) {
        let mut shards = 0;
        let mut segments = 0;
        for stripe in self.stripes.iter() {
            let map = stripe.read();
            shards += map.len();
            segments += map.values().map(ShardIndex::len).sum::<usize>();
        }
        (shards, segments)
    }
}

impl std::fmt::Debug for ShardTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShardTable")
            .field("stripes", &self.stripes.len())
            .finish()
    }
}

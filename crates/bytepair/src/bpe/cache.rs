//! # Merge Caches
//!
//! Memoization of ``mapped chunk -> merged symbols``.
//!
//! Merging is a pure function of the chunk, so an entry is never stale;
//! eviction only costs recomputation. Caches are sharded by key hash, each
//! shard behind its own lock, so concurrent encoders rarely contend.

use core::{fmt::Debug, hash::BuildHasher, num::NonZeroUsize};
use std::sync::Arc;

use lru::LruCache;
use parking_lot::{Mutex, RwLock};

use crate::{
    concurrency::threads::resolve_parallelism,
    types::{CommonHashBuilder, CommonHashMap},
};

/// The final symbol sequence of a merged chunk.
pub type MergedSymbols = Arc<[String]>;

/// The default total capacity of an [`LruMergeCache`].
pub const DEFAULT_LRU_CAPACITY: NonZeroUsize = NonZeroUsize::new(65_536).unwrap();

/// Shared memo cache for [`BpeMerger`](super::BpeMerger).
///
/// Implementations must tolerate concurrent `get` / `insert`;
/// two threads computing and inserting the same key is fine.
pub trait MergeCache: Send + Sync + Debug {
    /// Look up the merged symbols of a mapped chunk.
    fn get(
        &self,
        key: &str,
    ) -> Option<MergedSymbols>;

    /// Record the merged symbols of a mapped chunk.
    fn insert(
        &self,
        key: &str,
        value: MergedSymbols,
    );

    /// The number of cached entries.
    fn len(&self) -> usize;

    /// Is the cache empty?
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all entries.
    fn clear(&self);
}

/// Resolve a shard count; `None` uses the system parallelism.
fn resolve_shards(shards: Option<NonZeroUsize>) -> usize {
    shards
        .map(NonZeroUsize::get)
        .unwrap_or_else(|| resolve_parallelism(None))
        .max(1)
}

/// Bounded, sharded, least-recently-used cache.
///
/// The capacity is split across the shards so the total is exact;
/// the first ``capacity % shards`` shards hold one extra entry.
pub struct LruMergeCache {
    hasher: CommonHashBuilder,
    shards: Vec<Mutex<LruCache<String, MergedSymbols>>>,
}

impl LruMergeCache {
    /// Build a new cache.
    ///
    /// ## Arguments
    /// * `capacity` - the total entry budget.
    /// * `shards` - the number of shards; if None, lib defaults are used.
    pub fn new(
        capacity: NonZeroUsize,
        shards: Option<NonZeroUsize>,
    ) -> Self {
        let shard_count = resolve_shards(shards).min(capacity.get());
        let base = capacity.get() / shard_count;
        let extra = capacity.get() % shard_count;

        log::debug!(
            "LruMergeCache: capacity={}, shards={shard_count}, per_shard={base}..={}",
            capacity,
            base + usize::from(extra > 0)
        );

        // `shard_count <= capacity`, so every shard gets at least one entry.
        let shards = (0..shard_count)
            .map(|idx| base + usize::from(idx < extra))
            .filter_map(NonZeroUsize::new)
            .map(|cap| Mutex::new(LruCache::new(cap)))
            .collect();

        Self {
            hasher: CommonHashBuilder::default(),
            shards,
        }
    }

    /// The total entry budget.
    pub fn capacity(&self) -> usize {
        self.shards.iter().map(|s| s.lock().cap().get()).sum()
    }

    /// The number of shards.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    fn shard(
        &self,
        key: &str,
    ) -> &Mutex<LruCache<String, MergedSymbols>> {
        let idx = BuildHasher::hash_one(&self.hasher, key) as usize % self.shards.len();
        &self.shards[idx]
    }
}

impl Default for LruMergeCache {
    fn default() -> Self {
        Self::new(DEFAULT_LRU_CAPACITY, None)
    }
}

impl Debug for LruMergeCache {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("LruMergeCache")
            .field("shards", &self.shards.len())
            .field("len", &self.len())
            .finish()
    }
}

impl MergeCache for LruMergeCache {
    fn get(
        &self,
        key: &str,
    ) -> Option<MergedSymbols> {
        self.shard(key).lock().get(key).cloned()
    }

    fn insert(
        &self,
        key: &str,
        value: MergedSymbols,
    ) {
        self.shard(key).lock().put(key.to_string(), value);
    }

    fn len(&self) -> usize {
        self.shards.iter().map(|s| s.lock().len()).sum()
    }

    fn clear(&self) {
        for shard in &self.shards {
            shard.lock().clear();
        }
    }
}

/// Unbounded, sharded cache; entries are never evicted.
pub struct UnboundedMergeCache {
    hasher: CommonHashBuilder,
    shards: Vec<RwLock<CommonHashMap<String, MergedSymbols>>>,
}

impl UnboundedMergeCache {
    /// Build a new cache.
    ///
    /// ## Arguments
    /// * `shards` - the number of shards; if None, lib defaults are used.
    pub fn new(shards: Option<NonZeroUsize>) -> Self {
        let shard_count = resolve_shards(shards);
        log::debug!("UnboundedMergeCache: shards={shard_count}");

        Self {
            hasher: CommonHashBuilder::default(),
            shards: (0..shard_count)
                .map(|_| RwLock::new(CommonHashMap::default()))
                .collect(),
        }
    }

    fn shard(
        &self,
        key: &str,
    ) -> &RwLock<CommonHashMap<String, MergedSymbols>> {
        let idx = BuildHasher::hash_one(&self.hasher, key) as usize % self.shards.len();
        &self.shards[idx]
    }
}

impl Default for UnboundedMergeCache {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Debug for UnboundedMergeCache {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("UnboundedMergeCache")
            .field("shards", &self.shards.len())
            .field("len", &self.len())
            .finish()
    }
}

impl MergeCache for UnboundedMergeCache {
    fn get(
        &self,
        key: &str,
    ) -> Option<MergedSymbols> {
        self.shard(key).read().get(key).cloned()
    }

    fn insert(
        &self,
        key: &str,
        value: MergedSymbols,
    ) {
        self.shard(key).write().insert(key.to_string(), value);
    }

    fn len(&self) -> usize {
        self.shards.iter().map(|s| s.read().len()).sum()
    }

    fn clear(&self) {
        for shard in &self.shards {
            shard.write().clear();
        }
    }
}

/// A cache which stores nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMergeCache;

impl MergeCache for NoMergeCache {
    fn get(
        &self,
        _key: &str,
    ) -> Option<MergedSymbols> {
        None
    }

    fn insert(
        &self,
        _key: &str,
        _value: MergedSymbols,
    ) {
    }

    fn len(&self) -> usize {
        0
    }

    fn clear(&self) {}
}

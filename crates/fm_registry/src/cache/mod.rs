//! Memoizing wrapper around any [`Resolve`] implementation.
//!
//! Two backends, chosen once from a [`CachePolicy`]:
//!
//! - **Unbounded**: a sharded `DashMap`. Reads and writes run in parallel
//!   and nothing is evicted. On a miss the delegate runs outside any lock
//!   and the first value stored for a key wins, so racing callers may each
//!   run the delegate once but all of them return an equal result.
//! - **Bounded**: an `LruCache` behind one `parking_lot::Mutex`. Lookup,
//!   compute and insert happen under that lock, so the delegate runs at
//!   most once per resident key. The table grows with use; the capacity
//!   only caps it, so a huge configured size costs nothing up front. The lock is a contention point under many
//!   concurrent callers; prefer the unbounded backend when throughput
//!   matters more than a memory cap.
//!
//! Negative results (`None`) are cached like any other.

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use fm_hierarchy::TypeIdx;
use lru::LruCache;
use parking_lot::Mutex;
use rustc_hash::FxBuildHasher;
use tracing::{debug, trace};

use crate::Resolve;

/// Which cache backend to use.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum CachePolicy {
    /// Never evicts.
    #[default]
    Unbounded,
    /// Evicts the least recently used entry beyond the given capacity.
    Bounded(NonZeroUsize),
}

impl CachePolicy {
    /// Map a configured entry limit to a policy.
    ///
    /// Values `<= 0` select the unbounded backend.
    pub fn from_max_entries(max_entries: i64) -> Self {
        if max_entries <= 0 {
            return Self::Unbounded;
        }
        let capacity = usize::try_from(max_entries).unwrap_or(usize::MAX);
        NonZeroUsize::new(capacity).map_or(Self::Unbounded, Self::Bounded)
    }

    pub fn capacity(self) -> Option<NonZeroUsize> {
        match self {
            Self::Unbounded => None,
            Self::Bounded(capacity) => Some(capacity),
        }
    }
}

/// Cache hit/miss statistics.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Entries currently resident.
    pub entries: usize,
}

impl CacheStats {
    /// Fraction of lookups served from the cache, `0.0` before any lookup.
    #[expect(
        clippy::cast_precision_loss,
        reason = "ratio is informational; counts beyond 2^52 are irrelevant"
    )]
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

enum Backend<H> {
    Unbounded(DashMap<TypeIdx, Option<H>, FxBuildHasher>),
    Bounded {
        lru: Mutex<LruCache<TypeIdx, Option<H>, FxBuildHasher>>,
        capacity: NonZeroUsize,
    },
}

/// Thread-safe memo table from target type to resolved handler.
pub struct ResolverCache<H> {
    backend: Backend<H>,
    policy: CachePolicy,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<H: Clone> ResolverCache<H> {
    pub fn new(policy: CachePolicy) -> Self {
        let backend = match policy {
            CachePolicy::Unbounded => {
                Backend::Unbounded(DashMap::with_hasher(FxBuildHasher))
            }
            // `LruCache::new` preallocates `capacity` slots.
            CachePolicy::Bounded(capacity) => Backend::Bounded {
                lru: Mutex::new(LruCache::unbounded_with_hasher(FxBuildHasher)),
                capacity,
            },
        };
        Self {
            backend,
            policy,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    ///
    /// With the bounded backend `compute` runs while the cache lock is held;
    /// it must not call back into this cache.
    pub fn get_or_compute<F>(&self, key: TypeIdx, compute: F) -> Option<H>
    where
        F: FnOnce(TypeIdx) -> Option<H>,
    {
        match &self.backend {
            Backend::Unbounded(map) => {
                if let Some(hit) = map.get(&key).map(|entry| entry.value().clone()) {
                    self.record_hit(key);
                    return hit;
                }
                self.record_miss(key);

                let computed = compute(key);
                // Another caller may have stored a value meanwhile; keep theirs.
                map.entry(key).or_insert(computed).value().clone()
            }
            Backend::Bounded { lru, capacity } => {
                let mut cache = lru.lock();
                if let Some(hit) = cache.get(&key) {
                    self.record_hit(key);
                    return hit.clone();
                }
                self.record_miss(key);

                let computed = compute(key);
                cache.put(key, computed.clone());
                while cache.len() > capacity.get() {
                    let Some((evicted, _)) = cache.pop_lru() else {
                        break;
                    };
                    trace!(?evicted, "evicted least recently used entry");
                }
                computed
            }
        }
    }

    /// Whether `key` is resident, without touching its recency.
    pub fn contains(&self, key: TypeIdx) -> bool {
        match &self.backend {
            Backend::Unbounded(map) => map.contains_key(&key),
            Backend::Bounded { lru, .. } => lru.lock().contains(&key),
        }
    }

    pub fn len(&self) -> usize {
        match &self.backend {
            Backend::Unbounded(map) => map.len(),
            Backend::Bounded { lru, .. } => lru.lock().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry. Statistics are kept.
    pub fn clear(&self) {
        match &self.backend {
            Backend::Unbounded(map) => map.clear(),
            Backend::Bounded { lru, .. } => lru.lock().clear(),
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }

    #[inline]
    fn record_hit(&self, key: TypeIdx) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        trace!(?key, "resolver cache hit");
    }

    #[inline]
    fn record_miss(&self, key: TypeIdx) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        trace!(?key, "resolver cache miss");
    }
}

impl<H> fmt::Debug for ResolverCache<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverCache")
            .field("policy", &self.policy)
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// A [`Resolve`] implementation that memoizes its delegate.
///
/// Each instance owns its cache; nothing is shared between instances.
pub struct CachingResolver<R: Resolve> {
    delegate: R,
    cache: ResolverCache<R::Handler>,
}

impl<R: Resolve> CachingResolver<R> {
    /// Wrap `delegate` with an unbounded cache.
    pub fn new(delegate: R) -> Self {
        Self::with_policy(delegate, CachePolicy::Unbounded)
    }

    pub fn with_policy(delegate: R, policy: CachePolicy) -> Self {
        debug!(?policy, "resolver cache enabled");
        Self {
            delegate,
            cache: ResolverCache::new(policy),
        }
    }

    /// Wrap `delegate`; `max_entries <= 0` means unbounded.
    pub fn with_max_entries(delegate: R, max_entries: i64) -> Self {
        Self::with_policy(delegate, CachePolicy::from_max_entries(max_entries))
    }

    pub fn delegate(&self) -> &R {
        &self.delegate
    }

    pub fn cache(&self) -> &ResolverCache<R::Handler> {
        &self.cache
    }

    pub fn policy(&self) -> CachePolicy {
        self.cache.policy()
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn clear(&self) {
        self.cache.clear();
    }
}

impl<R: Resolve> Resolve for CachingResolver<R> {
    type Handler = R::Handler;

    fn resolve(&self, target: TypeIdx) -> Option<Self::Handler> {
        self.cache
            .get_or_compute(target, |key| self.delegate.resolve(key))
    }
}

impl<R: Resolve> fmt::Debug for CachingResolver<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachingResolver")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

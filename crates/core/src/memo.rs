//! Time-bounded memo shared by every cache in Domain Search.
//!
//! A thin wrapper over `moka`'s future cache with a fixed time-to-live:
//! entries become unreadable once their TTL elapses, whether or not they
//! have been evicted yet. The `get_or_*` methods are single-flight: callers
//! racing on the same missing key share one initialization.

use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

/// Upper bound on entries; results and labels are small and short-lived.
const DEFAULT_MAX_ENTRIES: u64 = 10_000;

/// A key→value memo whose entries expire a fixed time after insertion.
#[derive(Clone)]
pub struct TimedMemo<K, V> {
    cache: Cache<K, V>,
    ttl: Duration,
}

impl<K, V> TimedMemo<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Create a memo whose entries live for `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, DEFAULT_MAX_ENTRIES)
    }

    /// Create a memo with an explicit entry bound.
    #[must_use]
    pub fn with_capacity(ttl: Duration, max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();
        Self { cache, ttl }
    }

    /// Return the value for `key` if it is still fresh.
    pub async fn get(&self, key: &K) -> Option<V> {
        self.cache.get(key).await
    }

    /// Store `value` under `key`, restarting its TTL.
    pub async fn set(&self, key: K, value: V) {
        self.cache.insert(key, value).await;
    }

    /// Return the fresh value for `key`, or compute and store it.
    ///
    /// Concurrent callers for the same key await a single `init`.
    pub async fn get_or_insert_with<F>(&self, key: K, init: F) -> V
    where
        F: Future<Output = V>,
    {
        self.cache.get_with(key, init).await
    }

    /// Like [`Self::get_or_insert_with`], but failures are not stored.
    ///
    /// Every caller that shared a failed initialization receives the same
    /// error.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `init`.
    pub async fn try_get_or_insert_with<F, E>(&self, key: K, init: F) -> Result<V, Arc<E>>
    where
        F: Future<Output = Result<V, E>>,
        E: Send + Sync + 'static,
    {
        self.cache.try_get_with(key, init).await
    }
}

impl<K, V> std::fmt::Debug for TimedMemo<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimedMemo")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

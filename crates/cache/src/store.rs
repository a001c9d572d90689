//! Key/value store with per-entry TTLs.
//!
//! Backed by `DashMap` so concurrent `get`/`set` calls on distinct or
//! identical keys are safe without external locking. Stale-read-then-write
//! races on the same key resolve last-write-wins, which is acceptable
//! because entries are idempotent recomputations.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use common::Error;
use dashmap::DashMap;

use crate::key::CacheKey;

/// A cache hit: the stored value plus when it was stored.
#[derive(Debug, Clone)]
pub struct CachedValue<T> {
    pub value: T,
    pub cached_at: DateTime<Utc>,
}

/// Storage contract for the cache-aside fetchers.
///
/// Any operation may fail; callers must treat a failed `get` as a miss
/// and a failed `set` as a no-op. System correctness never depends on
/// the cache succeeding.
#[async_trait]
pub trait CacheStore<T>: Send + Sync {
    async fn get(&self, key: &CacheKey) -> Result<Option<CachedValue<T>>, Error>;
    async fn set(&self, key: &CacheKey, value: T, ttl: Duration) -> Result<(), Error>;
    async fn delete(&self, key: &CacheKey) -> Result<(), Error>;
}

struct StoredEntry<T> {
    value: T,
    cached_at: DateTime<Utc>,
    ttl: Duration,
}

impl<T> StoredEntry<T> {
    /// An entry is live iff `now - cached_at < ttl`.
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        let ttl = ChronoDuration::from_std(self.ttl).unwrap_or(ChronoDuration::MAX);
        now.signed_duration_since(self.cached_at) < ttl
    }
}

/// In-memory cache store.
pub struct MemoryStore<T> {
    entries: DashMap<CacheKey, StoredEntry<T>>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Number of physically stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> CacheStore<T> for MemoryStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &CacheKey) -> Result<Option<CachedValue<T>>, Error> {
        let now = Utc::now();
        let hit = match self.entries.get(key) {
            Some(entry) if entry.is_live(now) => Some(CachedValue {
                value: entry.value.clone(),
                cached_at: entry.cached_at,
            }),
            Some(_) => None,
            None => return Ok(None),
        };

        if hit.is_none() {
            // Expired entry is logically a miss; drop it while we're here.
            self.entries.remove(key);
        }
        Ok(hit)
    }

    async fn set(&self, key: &CacheKey, value: T, ttl: Duration) -> Result<(), Error> {
        self.entries.insert(
            key.clone(),
            StoredEntry {
                value,
                cached_at: Utc::now(),
                ttl,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &CacheKey) -> Result<(), Error> {
        self.entries.remove(key);
        Ok(())
    }
}

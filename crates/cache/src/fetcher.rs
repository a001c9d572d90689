//! Cache-aside fetchers for readings and weather.
//!
//! Each fetcher checks the store, falls back to its upstream source on a
//! miss, and writes the fresh value back best-effort. Store faults are
//! logged at warning level and absorbed; upstream faults propagate.

use std::time::Duration;

use chrono::{DateTime, Utc};
use common::sources::{SensorSource, WeatherSource};
use common::{Coordinates, Error, SensorReading, WeatherSnapshot};
use tracing::warn;

use crate::key::CacheKey;
use crate::store::CacheStore;

/// TTL for gauge readings. USGS stations report every 15–60 minutes, so
/// anything older than 15 minutes may already be superseded.
pub const READINGS_TTL: Duration = Duration::from_secs(15 * 60);

/// TTL for weather snapshots. Forecast sources update hourly.
pub const WEATHER_TTL: Duration = Duration::from_secs(60 * 60);

/// The result of a cache-aside fetch.
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    pub data: T,
    /// Whether the data came from the cache.
    pub cached: bool,
    /// When the data was cached; `None` on a fresh fetch.
    pub cached_at: Option<DateTime<Utc>>,
}

// ── Readings ──────────────────────────────────────────────────────────

/// Cache-aside wrapper around a [`SensorSource`].
pub struct ReadingsFetcher<S, C> {
    source: S,
    store: C,
}

impl<S, C> ReadingsFetcher<S, C>
where
    S: SensorSource,
    C: CacheStore<Vec<SensorReading>>,
{
    pub fn new(source: S, store: C) -> Self {
        Self { source, store }
    }

    fn key(station_ids: &[String]) -> CacheKey {
        CacheKey::new("usgs", station_ids)
    }

    pub async fn fetch(&self, station_ids: &[String]) -> Result<Fetched<Vec<SensorReading>>, Error> {
        let key = Self::key(station_ids);

        match self.store.get(&key).await {
            Ok(Some(hit)) => {
                return Ok(Fetched {
                    data: hit.value,
                    cached: true,
                    cached_at: Some(hit.cached_at),
                });
            }
            Ok(None) => {}
            Err(e) => warn!("readings cache read failed for {}: {} — treating as miss", key, e),
        }

        let data = self.source.fetch_readings(station_ids).await?;

        if let Err(e) = self.store.set(&key, data.clone(), READINGS_TTL).await {
            warn!("readings cache write failed for {}: {}", key, e);
        }

        Ok(Fetched {
            data,
            cached: false,
            cached_at: None,
        })
    }

    /// Explicit cache-bust for a station set.
    pub async fn invalidate(&self, station_ids: &[String]) {
        let key = Self::key(station_ids);
        if let Err(e) = self.store.delete(&key).await {
            warn!("readings cache delete failed for {}: {}", key, e);
        }
    }
}

// ── Weather ───────────────────────────────────────────────────────────

/// Cache-aside wrapper around a [`WeatherSource`].
pub struct WeatherFetcher<W, C> {
    source: W,
    store: C,
}

impl<W, C> WeatherFetcher<W, C>
where
    W: WeatherSource,
    C: CacheStore<WeatherSnapshot>,
{
    pub fn new(source: W, store: C) -> Self {
        Self { source, store }
    }

    fn key(coords: Coordinates) -> CacheKey {
        CacheKey::new(
            "weather",
            &[
                format!("lat={:.4}", coords.lat),
                format!("lon={:.4}", coords.lon),
            ],
        )
    }

    pub async fn fetch(&self, coords: Coordinates) -> Result<Fetched<WeatherSnapshot>, Error> {
        let key = Self::key(coords);

        match self.store.get(&key).await {
            Ok(Some(hit)) => {
                return Ok(Fetched {
                    data: hit.value,
                    cached: true,
                    cached_at: Some(hit.cached_at),
                });
            }
            Ok(None) => {}
            Err(e) => warn!("weather cache read failed for {}: {} — treating as miss", key, e),
        }

        let data = self.source.fetch_weather(coords).await?;

        if let Err(e) = self.store.set(&key, data.clone(), WEATHER_TTL).await {
            warn!("weather cache write failed for {}: {}", key, e);
        }

        Ok(Fetched {
            data,
            cached: false,
            cached_at: None,
        })
    }

    /// Explicit cache-bust for a coordinate pair.
    pub async fn invalidate(&self, coords: Coordinates) {
        let key = Self::key(coords);
        if let Err(e) = self.store.delete(&key).await {
            warn!("weather cache delete failed for {}: {}", key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{CachedValue, MemoryStore};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Upstream fake that counts calls and can be told to fail.
    struct FakeSensors {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl SensorSource for FakeSensors {
        async fn fetch_readings(
            &self,
            station_ids: &[String],
        ) -> Result<Vec<SensorReading>, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::Usgs("station offline".into()));
            }
            Ok(station_ids
                .iter()
                .map(|id| SensorReading {
                    station_id: id.clone(),
                    timestamp: Utc::now(),
                    water_temp_f: Some(52.0),
                    discharge_cfs: Some(800.0),
                    gage_height_ft: None,
                })
                .collect())
        }
    }

    /// Store fake whose every operation fails.
    struct BrokenStore;

    #[async_trait]
    impl<T: Send + Sync + 'static> CacheStore<T> for BrokenStore {
        async fn get(&self, _key: &CacheKey) -> Result<Option<CachedValue<T>>, Error> {
            Err(Error::Cache("backend unavailable".into()))
        }
        async fn set(&self, _key: &CacheKey, _value: T, _ttl: Duration) -> Result<(), Error> {
            Err(Error::Cache("backend unavailable".into()))
        }
        async fn delete(&self, _key: &CacheKey) -> Result<(), Error> {
            Err(Error::Cache("backend unavailable".into()))
        }
    }

    fn stations() -> Vec<String> {
        vec!["06041000".into()]
    }

    #[tokio::test]
    async fn test_miss_then_hit() {
        let calls = Arc::new(AtomicUsize::new(0));
        let fetcher = ReadingsFetcher::new(
            FakeSensors {
                calls: calls.clone(),
                fail: false,
            },
            MemoryStore::new(),
        );

        let first = fetcher.fetch(&stations()).await.unwrap();
        assert!(!first.cached);
        assert!(first.cached_at.is_none());

        let second = fetcher.fetch(&stations()).await.unwrap();
        assert!(second.cached);
        assert!(second.cached_at.is_some());
        assert_eq!(second.data.len(), 1);

        // Upstream hit exactly once.
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_broken_store_degrades_to_direct_fetch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let fetcher = ReadingsFetcher::new(
            FakeSensors {
                calls: calls.clone(),
                fail: false,
            },
            BrokenStore,
        );

        let a = fetcher.fetch(&stations()).await.unwrap();
        let b = fetcher.fetch(&stations()).await.unwrap();
        assert!(!a.cached);
        assert!(!b.cached);
        // Every request goes upstream when the cache is down.
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let fetcher = ReadingsFetcher::new(
            FakeSensors {
                calls: Arc::new(AtomicUsize::new(0)),
                fail: true,
            },
            MemoryStore::new(),
        );

        let err = fetcher.fetch(&stations()).await.unwrap_err();
        assert!(matches!(err, Error::Usgs(_)));
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let fetcher = ReadingsFetcher::new(
            FakeSensors {
                calls: calls.clone(),
                fail: false,
            },
            MemoryStore::new(),
        );

        fetcher.fetch(&stations()).await.unwrap();
        fetcher.invalidate(&stations()).await;
        let after = fetcher.fetch(&stations()).await.unwrap();

        assert!(!after.cached);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_station_order_shares_cache_entry() {
        let calls = Arc::new(AtomicUsize::new(0));
        let fetcher = ReadingsFetcher::new(
            FakeSensors {
                calls: calls.clone(),
                fail: false,
            },
            MemoryStore::new(),
        );

        let forward: Vec<String> = vec!["06041000".into(), "06043500".into()];
        let reversed: Vec<String> = vec!["06043500".into(), "06041000".into()];

        fetcher.fetch(&forward).await.unwrap();
        let hit = fetcher.fetch(&reversed).await.unwrap();

        assert!(hit.cached);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

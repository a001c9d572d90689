//! Cache-aside layer fronting the upstream sensor and weather sources.
//!
//! The store is read-through with per-entry TTLs; fetchers consult it
//! first and fall back to the upstream source on a miss. Cache faults are
//! absorbed here (a failed read is a miss, a failed write is a no-op) —
//! only upstream faults propagate to callers.

pub mod fetcher;
pub mod key;
pub mod store;

pub use fetcher::{Fetched, ReadingsFetcher, WeatherFetcher, READINGS_TTL, WEATHER_TTL};
pub use key::CacheKey;
pub use store::{CacheStore, CachedValue, MemoryStore};

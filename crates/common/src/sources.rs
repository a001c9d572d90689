//! Upstream fetch interfaces.
//!
//! The aggregation core only ever talks to sensors and weather through
//! these traits; concrete HTTP clients (and test fakes) implement them.
//! No retry logic lives at this layer — a failed fetch propagates as-is.

use crate::error::Error;
use crate::types::{Coordinates, SensorReading, WeatherSnapshot};
use async_trait::async_trait;

/// Source of river gauge readings.
#[async_trait]
pub trait SensorSource: Send + Sync {
    /// Fetch the latest readings for a set of stations.
    ///
    /// Returns one reading per station that responded; stations the
    /// upstream does not know about are simply absent from the result.
    async fn fetch_readings(&self, station_ids: &[String]) -> Result<Vec<SensorReading>, Error>;
}

/// Source of current weather conditions.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch_weather(&self, coords: Coordinates) -> Result<WeatherSnapshot, Error>;
}

//! Open-Meteo current-conditions client.
//!
//! Fetches the current weather block for a coordinate pair and maps it
//! to a [`WeatherSnapshot`]. Units are requested as Fahrenheit and mph
//! so no conversion happens on our side; timestamps are requested in
//! UTC.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use common::sources::WeatherSource;
use common::{Coordinates, Error, WeatherSnapshot};
use serde::Deserialize;
use tracing::debug;

/// Open-Meteo forecast client with connection pooling.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: reqwest::Client,
    base_url: String,
}

// ── Open-Meteo response types ─────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
pub struct CurrentConditions {
    /// ISO timestamp without zone suffix, e.g. "2025-04-15T13:00".
    pub time: String,
    pub temperature_2m: f64,
    #[serde(default)]
    pub cloud_cover: f64,
    #[serde(default)]
    pub precipitation_probability: Option<f64>,
    pub wind_speed_10m: f64,
    pub is_day: u8,
}

// ── Implementation ────────────────────────────────────────────────────

impl OpenMeteoClient {
    pub fn new() -> Self {
        Self::with_base_url("https://api.open-meteo.com/v1/forecast".into())
    }

    pub fn with_base_url(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("hatchcast/0.1 (river conditions; contact@example.com)")
            .pool_max_idle_per_host(4)
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("failed to build Open-Meteo HTTP client");

        Self { client, base_url }
    }

    /// Fetch the raw current-conditions document for a coordinate pair.
    pub async fn fetch_current(&self, coords: Coordinates) -> Result<ForecastResponse, Error> {
        let url = format!(
            "{}?latitude={:.4}&longitude={:.4}\
             &current=temperature_2m,cloud_cover,precipitation_probability,wind_speed_10m,is_day\
             &temperature_unit=fahrenheit&wind_speed_unit=mph&timezone=UTC",
            self.base_url, coords.lat, coords.lon,
        );

        debug!("Fetching Open-Meteo current conditions: {}", url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Weather(format!("HTTP error for {:?}: {}", coords, e)))?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Weather(format!(
                "Open-Meteo returned {}: {}",
                status,
                &body[..body.len().min(500)]
            )));
        }

        resp.json()
            .await
            .map_err(|e| Error::Weather(format!("JSON parse error: {}", e)))
    }
}

impl Default for OpenMeteoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoClient {
    async fn fetch_weather(&self, coords: Coordinates) -> Result<WeatherSnapshot, Error> {
        let response = self.fetch_current(coords).await?;
        snapshot_from_response(&response)
    }
}

/// Map the current block to a snapshot. Missing precipitation
/// probability (Open-Meteo omits it for some regions) is read as 0.
pub fn snapshot_from_response(response: &ForecastResponse) -> Result<WeatherSnapshot, Error> {
    let current = &response.current;
    let timestamp = NaiveDateTime::parse_from_str(&current.time, "%Y-%m-%dT%H:%M")
        .map_err(|e| Error::Weather(format!("bad timestamp {:?}: {}", current.time, e)))?
        .and_utc();

    Ok(WeatherSnapshot {
        timestamp,
        air_temp_f: current.temperature_2m,
        cloud_cover_percent: current.cloud_cover,
        precip_probability: current.precipitation_probability.unwrap_or(0.0),
        wind_speed_mph: current.wind_speed_10m,
        is_daylight: current.is_day != 0,
    })
}

//! Domain types shared across hatchcast.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Sensor & Weather Types ────────────────────────────────────────────

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// A single observation from a USGS gauging station.
///
/// Any field may be `None` when the station is not instrumented for that
/// parameter. `None` is never interchangeable with a valid zero reading —
/// a 0.0 discharge is a dry channel, a missing discharge is an
/// uninstrumented one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorReading {
    /// USGS site number (e.g. "06041000").
    pub station_id: String,
    /// Observation time.
    pub timestamp: DateTime<Utc>,
    /// Water temperature in °F.
    pub water_temp_f: Option<f64>,
    /// Discharge in cubic feet per second.
    pub discharge_cfs: Option<f64>,
    /// Gage height in feet.
    pub gage_height_ft: Option<f64>,
}

/// Current weather conditions at a location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Forecast/observation time.
    pub timestamp: DateTime<Utc>,
    /// Air temperature in °F.
    pub air_temp_f: f64,
    /// Cloud cover, 0–100.
    pub cloud_cover_percent: f64,
    /// Precipitation probability, 0–100.
    pub precip_probability: f64,
    /// Wind speed in mph.
    pub wind_speed_mph: f64,
    /// Whether the sun is currently up at the location.
    pub is_daylight: bool,
}

/// A monitored river location.
///
/// Owns zero or more sensor stations and at most one weather snapshot
/// (looked up by coordinates). Catalog entries are read-only after startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub region: String,
    pub state: String,
    /// USGS site numbers feeding this location.
    pub sensor_station_ids: Vec<String>,
    /// Missing coordinates means no weather lookup for this location.
    pub coordinates: Option<Coordinates>,
}

// ── Prediction Types ──────────────────────────────────────────────────

/// Qualitative confidence tier for a hatch prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// A scored hatch candidate for one location at one point in time.
///
/// Recomputed on every request — never persisted, never shared across
/// requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HatchPrediction {
    pub hatch_id: String,
    pub name: String,
    /// Probability the hatch is active, 0.0–1.0.
    pub probability: f64,
    pub confidence: Confidence,
    /// Human-readable explanation of the contributing factors.
    pub rationale: String,
}

// ── Scoring Types ─────────────────────────────────────────────────────

/// Quality band derived from the composite score.
///
/// Ordering is best-first so it can serve directly as a sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Excellent,
    Good,
    Fair,
    Slow,
}

impl Tier {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => Tier::Excellent,
            60..=79 => Tier::Good,
            40..=59 => Tier::Fair,
            _ => Tier::Slow,
        }
    }
}

/// The scored result for a single location within one ranking request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationScore {
    pub location_id: String,
    pub name: String,
    /// Composite fishability score, 0–100.
    pub score: u8,
    pub tier: Tier,
    pub readings: Vec<SensorReading>,
    pub weather: Option<WeatherSnapshot>,
    /// Hatch candidates, best first.
    pub top_hatches: Vec<HatchPrediction>,
}

/// The ordered result of a ranking call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingResponse {
    /// Locations sorted by score descending (deterministic tie-break).
    pub locations: Vec<LocationScore>,
    pub count: usize,
    pub generated_at: DateTime<Utc>,
}

// ── Helpers ───────────────────────────────────────────────────────────

/// The most recent water temperature across a location's readings.
///
/// Skips readings whose temperature channel is uninstrumented; returns
/// `None` only when no station reported a temperature at all.
pub fn latest_water_temp(readings: &[SensorReading]) -> Option<f64> {
    readings
        .iter()
        .filter(|r| r.water_temp_f.is_some())
        .max_by_key(|r| r.timestamp)
        .and_then(|r| r.water_temp_f)
}

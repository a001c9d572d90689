//! Hatchcast configuration types.

use crate::types::{Coordinates, Location};
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HatchcastConfig {
    /// Monitored river locations.
    #[serde(default = "default_locations")]
    pub locations: Vec<LocationConfig>,

    /// Fan-out concurrency ceiling for per-location scoring tasks.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// How many ranked locations to return.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

/// Configuration for a single monitored location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Stable identifier (e.g. "madison-ennis").
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Region label for display.
    pub region: String,
    /// Two-letter state code.
    pub state: String,
    /// USGS site numbers feeding this location.
    pub station_ids: Vec<String>,
    /// Latitude, if weather lookups are wanted.
    #[serde(default)]
    pub lat: Option<f64>,
    /// Longitude, if weather lookups are wanted.
    #[serde(default)]
    pub lon: Option<f64>,
}

impl LocationConfig {
    /// Convert to the runtime catalog entry.
    ///
    /// Coordinates require both latitude and longitude; a half-specified
    /// pair is treated as absent.
    pub fn to_location(&self) -> Location {
        let coordinates = match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinates { lat, lon }),
            _ => None,
        };
        Location {
            id: self.id.clone(),
            name: self.name.clone(),
            region: self.region.clone(),
            state: self.state.clone(),
            sensor_station_ids: self.station_ids.clone(),
            coordinates,
        }
    }
}

// ── Defaults ──────────────────────────────────────────────────────────

fn default_concurrency() -> usize {
    5
}

fn default_top_n() -> usize {
    10
}

fn default_locations() -> Vec<LocationConfig> {
    vec![
        LocationConfig {
            id: "madison-ennis".into(),
            name: "Madison River — Ennis".into(),
            region: "Southwest Montana".into(),
            state: "MT".into(),
            station_ids: vec!["06041000".into()],
            lat: Some(45.3493),
            lon: Some(-111.7319),
        },
        LocationConfig {
            id: "gallatin-gateway".into(),
            name: "Gallatin River — Gallatin Gateway".into(),
            region: "Southwest Montana".into(),
            state: "MT".into(),
            station_ids: vec!["06043500".into()],
            lat: Some(45.5066),
            lon: Some(-111.2702),
        },
        LocationConfig {
            id: "yellowstone-livingston".into(),
            name: "Yellowstone River — Livingston".into(),
            region: "Southwest Montana".into(),
            state: "MT".into(),
            station_ids: vec!["06192500".into()],
            lat: Some(45.5963),
            lon: Some(-110.5655),
        },
        LocationConfig {
            id: "missouri-craig".into(),
            name: "Missouri River — Craig".into(),
            region: "Central Montana".into(),
            state: "MT".into(),
            station_ids: vec!["06066500".into(), "06065500".into()],
            lat: Some(47.0689),
            lon: Some(-111.9641),
        },
        LocationConfig {
            id: "henrys-fork-island-park".into(),
            name: "Henry's Fork — Island Park".into(),
            region: "Eastern Idaho".into(),
            state: "ID".into(),
            station_ids: vec!["13042500".into()],
            lat: Some(44.4160),
            lon: Some(-111.3914),
        },
        LocationConfig {
            id: "south-platte-deckers".into(),
            name: "South Platte River — Deckers".into(),
            region: "Colorado Front Range".into(),
            state: "CO".into(),
            station_ids: vec!["06701900".into()],
            lat: Some(39.2542),
            lon: Some(-105.2270),
        },
        LocationConfig {
            id: "beaverkill-cooks-falls".into(),
            name: "Beaverkill — Cooks Falls".into(),
            region: "Catskills".into(),
            state: "NY".into(),
            station_ids: vec!["01420500".into()],
            lat: Some(41.9473),
            lon: Some(-74.9805),
        },
        LocationConfig {
            id: "wb-delaware-hale-eddy".into(),
            name: "West Branch Delaware — Hale Eddy".into(),
            region: "Catskills".into(),
            state: "NY".into(),
            station_ids: vec!["01426500".into()],
            lat: Some(42.0048),
            lon: Some(-75.3833),
        },
    ]
}

impl Default for HatchcastConfig {
    fn default() -> Self {
        Self {
            locations: default_locations(),
            concurrency: default_concurrency(),
            top_n: default_top_n(),
        }
    }
}

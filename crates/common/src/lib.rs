//! Shared domain types, configuration, and errors for hatchcast.

pub mod config;
pub mod error;
pub mod sources;
pub mod types;

pub use error::Error;
pub use types::{
    latest_water_temp, Confidence, Coordinates, HatchPrediction, Location, LocationScore,
    RankingResponse, SensorReading, Tier, WeatherSnapshot,
};

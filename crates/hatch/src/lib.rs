//! Hatch catalog and prediction engine.

pub mod catalog;
pub mod predict;

pub use catalog::{catalog, HatchDefinition, SkyPreference, TimeOfDayPreference};
pub use predict::{predict, TEMP_MARGIN_F};

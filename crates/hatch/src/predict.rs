//! Hatch prediction engine.
//!
//! A pure function from {readings, weather, calendar time} to scored
//! hatch candidates. Deterministic for given inputs: the caller passes
//! `as_of`, the wall clock is never read here. This is a weighted
//! heuristic, explicitly not a rigorous model.

use chrono::{DateTime, Datelike, Timelike, Utc};
use common::{latest_water_temp, Confidence, HatchPrediction, SensorReading, WeatherSnapshot};

use crate::catalog::{catalog, HatchDefinition, SkyPreference, TimeOfDayPreference};

/// Smoothing margin outside the temperature window, °F.
///
/// Temperature fit ramps linearly from 1.0 at the window edge to 0.0 at
/// the edge plus/minus this margin — no hard cliff at the exact boundary.
pub const TEMP_MARGIN_F: f64 = 4.0;

/// Fit factor used when no station reported a water temperature.
/// Calendar-only predictions survive at reduced confidence instead of
/// disappearing entirely.
const NO_TEMP_FACTOR: f64 = 0.5;

/// Predict active hatches for one location.
///
/// Returns candidates sorted by probability descending, ties broken by
/// name for determinism. Zero-probability candidates are dropped.
pub fn predict(
    readings: &[SensorReading],
    weather: Option<&WeatherSnapshot>,
    as_of: DateTime<Utc>,
) -> Vec<HatchPrediction> {
    let water_temp = latest_water_temp(readings);
    let month = as_of.month();
    let hour = as_of.hour();

    let mut predictions: Vec<HatchPrediction> = Vec::new();

    for def in catalog() {
        // Calendar is a hard gate: a hatch that is impossible this time
        // of year must not be revived by favorable water or weather.
        let calendar = calendar_fit(def, month);
        if calendar <= 0.0 {
            continue;
        }

        let (temp, temp_note) = match water_temp {
            Some(t) => (
                temperature_fit(def, t),
                format!("water {:.0}°F vs {:.0}-{:.0}°F window", t, def.min_temp_f, def.max_temp_f),
            ),
            None => (NO_TEMP_FACTOR, "no water temperature data".to_string()),
        };
        if temp <= 0.0 {
            continue;
        }

        let condition = condition_fit(def, weather, hour);

        let probability = (temp * calendar * condition).clamp(0.0, 1.0);
        if probability <= 0.0 {
            continue;
        }

        let confidence = if probability >= 0.6 {
            Confidence::High
        } else if probability >= 0.3 {
            Confidence::Medium
        } else {
            Confidence::Low
        };

        let calendar_note = if calendar >= 1.0 {
            "peak month"
        } else {
            "shoulder month"
        };
        let rationale = format!("{}; {}", temp_note, calendar_note);

        predictions.push(HatchPrediction {
            hatch_id: def.id.to_string(),
            name: def.name.to_string(),
            probability,
            confidence,
            rationale,
        });
    }

    predictions.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });

    predictions
}

/// Temperature fit: 1.0 inside the window, linear ramp to 0.0 over
/// [`TEMP_MARGIN_F`] beyond either bound, 0.0 past the margin.
fn temperature_fit(def: &HatchDefinition, water_temp_f: f64) -> f64 {
    let distance = if water_temp_f < def.min_temp_f {
        def.min_temp_f - water_temp_f
    } else if water_temp_f > def.max_temp_f {
        water_temp_f - def.max_temp_f
    } else {
        return 1.0;
    };

    (1.0 - distance / TEMP_MARGIN_F).max(0.0)
}

/// Calendar fit: 1.0 in a peak month, 0.4 in a month adjacent to one
/// (wrapping December→January), 0.0 otherwise.
fn calendar_fit(def: &HatchDefinition, month: u32) -> f64 {
    let mut best_distance = u32::MAX;
    for &peak in def.peak_months {
        let raw = peak.abs_diff(month);
        let cyclic = raw.min(12 - raw);
        best_distance = best_distance.min(cyclic);
    }
    match best_distance {
        0 => 1.0,
        1 => 0.4,
        _ => 0.0,
    }
}

/// Condition fit: sky preference against cloud cover, time-of-day
/// preference against the hour and daylight flag. Missing weather is
/// scored neutrally rather than as best or worst case.
fn condition_fit(def: &HatchDefinition, weather: Option<&WeatherSnapshot>, hour: u32) -> f64 {
    let Some(w) = weather else {
        return 0.8;
    };

    let sky = match def.sky {
        SkyPreference::Overcast if w.cloud_cover_percent >= 60.0 => 1.0,
        SkyPreference::Overcast => 0.7,
        SkyPreference::Sunny if w.cloud_cover_percent <= 40.0 => 1.0,
        SkyPreference::Sunny => 0.7,
        SkyPreference::Any => 1.0,
    };

    let time = match def.time_of_day {
        TimeOfDayPreference::Any => 1.0,
        // Daytime emergers rarely show after dark regardless of hour.
        _ if !w.is_daylight => 0.6,
        TimeOfDayPreference::Morning if (5..=11).contains(&hour) => 1.0,
        TimeOfDayPreference::Afternoon if (12..=16).contains(&hour) => 1.0,
        TimeOfDayPreference::Evening if (17..=21).contains(&hour) => 1.0,
        _ => 0.75,
    };

    sky * time
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reading(temp: Option<f64>) -> Vec<SensorReading> {
        vec![SensorReading {
            station_id: "06041000".into(),
            timestamp: Utc.with_ymd_and_hms(2025, 4, 15, 20, 0, 0).unwrap(),
            water_temp_f: temp,
            discharge_cfs: Some(600.0),
            gage_height_ft: Some(2.1),
        }]
    }

    fn overcast_afternoon() -> WeatherSnapshot {
        WeatherSnapshot {
            timestamp: Utc.with_ymd_and_hms(2025, 4, 15, 20, 0, 0).unwrap(),
            air_temp_f: 58.0,
            cloud_cover_percent: 80.0,
            precip_probability: 20.0,
            wind_speed_mph: 6.0,
            is_daylight: true,
        }
    }

    fn mid_april_afternoon() -> DateTime<Utc> {
        // 14:00 local-ish; the engine only looks at the hour of `as_of`.
        Utc.with_ymd_and_hms(2025, 4, 15, 14, 0, 0).unwrap()
    }

    #[test]
    fn test_identical_inputs_give_identical_output() {
        let readings = reading(Some(54.0));
        let weather = overcast_afternoon();
        let a = predict(&readings, Some(&weather), mid_april_afternoon());
        let b = predict(&readings, Some(&weather), mid_april_afternoon());
        assert_eq!(a, b);
    }

    #[test]
    fn test_mid_april_overcast_hendrickson_scenario() {
        // 54°F water, 80% cloud, daylight, mid-April: the Hendrickson
        // (50-58°F window, April peak, overcast-loving) must show strong.
        let readings = reading(Some(54.0));
        let weather = overcast_afternoon();
        let predictions = predict(&readings, Some(&weather), mid_april_afternoon());

        let hendrickson = predictions
            .iter()
            .find(|p| p.hatch_id == "hendrickson")
            .expect("hendrickson should be predicted");
        assert!(
            hendrickson.probability > 0.5,
            "probability {} should exceed 0.5",
            hendrickson.probability
        );
    }

    #[test]
    fn test_freezing_water_suppresses_warm_water_hatches() {
        let readings = reading(Some(32.0));
        let weather = overcast_afternoon();

        for month in 1..=12u32 {
            let as_of = Utc.with_ymd_and_hms(2025, month, 15, 14, 0, 0).unwrap();
            let predictions = predict(&readings, Some(&weather), as_of);
            for p in &predictions {
                let def = catalog()
                    .iter()
                    .find(|d| d.id == p.hatch_id)
                    .expect("prediction must come from the catalog");
                if def.min_temp_f > 35.0 {
                    assert!(
                        p.probability <= 0.1,
                        "{} at 32°F in month {}: probability {}",
                        p.hatch_id,
                        month,
                        p.probability
                    );
                }
            }
        }
    }

    #[test]
    fn test_in_band_beats_beyond_margin() {
        let weather = overcast_afternoon();
        let as_of = mid_april_afternoon();

        let in_band = predict(&reading(Some(50.0)), Some(&weather), as_of);
        let beyond = predict(&reading(Some(36.0)), Some(&weather), as_of);

        let p_in = in_band
            .iter()
            .find(|p| p.hatch_id == "blue-winged-olive")
            .map(|p| p.probability)
            .unwrap_or(0.0);
        let p_out = beyond
            .iter()
            .find(|p| p.hatch_id == "blue-winged-olive")
            .map(|p| p.probability)
            .unwrap_or(0.0);

        assert!(p_in > p_out, "in-band {} should beat beyond-margin {}", p_in, p_out);
        assert_eq!(p_out, 0.0, "42°F window minus >4°F margin should be zero");
    }

    #[test]
    fn test_missing_temperature_degrades_not_vanishes() {
        let weather = overcast_afternoon();
        let predictions = predict(&reading(None), Some(&weather), mid_april_afternoon());

        assert!(
            !predictions.is_empty(),
            "calendar-only predictions should survive missing temperature"
        );
        for p in &predictions {
            assert_ne!(
                p.confidence,
                Confidence::High,
                "{} should not be high-confidence without a water temperature",
                p.hatch_id
            );
            assert!(p.probability <= 0.5);
        }
    }

    #[test]
    fn test_calendar_gate_cannot_be_revived_by_conditions() {
        // Blue-Winged Olive peaks in spring and fall; July is two months
        // from any peak, so perfect water and sky must still yield nothing.
        let readings = reading(Some(50.0));
        let weather = overcast_afternoon();
        let july = Utc.with_ymd_and_hms(2025, 7, 15, 14, 0, 0).unwrap();

        let predictions = predict(&readings, Some(&weather), july);
        assert!(
            !predictions.iter().any(|p| p.hatch_id == "blue-winged-olive"),
            "out-of-season hatch must not appear"
        );
    }

    #[test]
    fn test_adjacent_month_is_reduced_but_nonzero() {
        let readings = reading(Some(52.0));
        let weather = overcast_afternoon();
        // Hendrickson peaks April/May; March is adjacent.
        let march = Utc.with_ymd_and_hms(2025, 3, 15, 14, 0, 0).unwrap();
        let april = mid_april_afternoon();

        let p_march = predict(&readings, Some(&weather), march)
            .iter()
            .find(|p| p.hatch_id == "hendrickson")
            .map(|p| p.probability)
            .expect("adjacent month should still predict");
        let p_april = predict(&readings, Some(&weather), april)
            .iter()
            .find(|p| p.hatch_id == "hendrickson")
            .map(|p| p.probability)
            .expect("peak month should predict");

        assert!(p_march > 0.0 && p_march < p_april);
    }

    #[test]
    fn test_output_is_sorted_by_probability_descending() {
        let readings = reading(Some(54.0));
        let weather = overcast_afternoon();
        let predictions = predict(&readings, Some(&weather), mid_april_afternoon());

        assert!(predictions.len() >= 2, "expected several April candidates");
        for pair in predictions.windows(2) {
            assert!(pair[0].probability >= pair[1].probability);
        }
    }

    #[test]
    fn test_zero_probability_results_are_dropped() {
        let readings = reading(Some(90.0)); // far above every window
        let predictions = predict(&readings, None, mid_april_afternoon());
        assert!(predictions.is_empty());
    }
}

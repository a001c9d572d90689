//! Composite fishability scoring.
//!
//! A location's score is the sum of three independently capped
//! sub-scores: water temperature (40), hatch density (30), and ambient
//! comfort (30). Missing data degrades a sub-score to a fixed neutral
//! midpoint — absence of data is never scored as best or worst case.

use common::{latest_water_temp, Confidence, HatchPrediction, SensorReading, WeatherSnapshot};

/// Neutral sub-score when no water temperature is available.
const NEUTRAL_TEMP_SCORE: f64 = 20.0;

/// Neutral sub-score when no weather snapshot is available.
const NEUTRAL_COMFORT_SCORE: f64 = 15.0;

/// Composite 0–100 score for one location.
pub fn score(
    readings: &[SensorReading],
    weather: Option<&WeatherSnapshot>,
    predictions: &[HatchPrediction],
) -> u8 {
    let total = temperature_score(latest_water_temp(readings))
        + hatch_density_score(predictions)
        + comfort_score(weather);
    total.round().clamp(0.0, 100.0) as u8
}

/// Water temperature sub-score, capped at 40.
///
/// Zero outside the 34–72°F band trout tolerate, a plateau across the
/// 50–62°F optimal band, linear ramps between. Breakpoints are tuned
/// heuristics — the shape is the contract, not the constants.
fn temperature_score(water_temp_f: Option<f64>) -> f64 {
    let Some(t) = water_temp_f else {
        return NEUTRAL_TEMP_SCORE;
    };

    if !(34.0..=72.0).contains(&t) {
        0.0
    } else if (50.0..=62.0).contains(&t) {
        40.0
    } else if t < 50.0 {
        (t - 34.0) / 16.0 * 40.0
    } else {
        (72.0 - t) / 10.0 * 40.0
    }
}

/// Hatch density sub-score, capped at 30.
///
/// High-confidence hatches are worth 8 points each up to three, with
/// diminishing returns beyond; medium-confidence hatches are worth 3.
fn hatch_density_score(predictions: &[HatchPrediction]) -> f64 {
    let high = predictions
        .iter()
        .filter(|p| p.confidence == Confidence::High)
        .count();
    let medium = predictions
        .iter()
        .filter(|p| p.confidence == Confidence::Medium)
        .count();

    let high_points = if high <= 3 {
        8.0 * high as f64
    } else {
        24.0 + 2.0 * (high - 3) as f64
    };

    (high_points + 3.0 * medium as f64).min(30.0)
}

/// Ambient comfort sub-score, capped at 30: wind, precipitation, and air
/// temperature bands, each independently bounded at 10.
fn comfort_score(weather: Option<&WeatherSnapshot>) -> f64 {
    let Some(w) = weather else {
        return NEUTRAL_COMFORT_SCORE;
    };

    let wind = match w.wind_speed_mph {
        v if v <= 5.0 => 10.0,
        v if v <= 12.0 => 7.0,
        v if v <= 20.0 => 4.0,
        _ => 1.0,
    };

    let precip = match w.precip_probability {
        p if p <= 20.0 => 10.0,
        p if p <= 50.0 => 6.0,
        p if p <= 80.0 => 3.0,
        _ => 1.0,
    };

    let air = match w.air_temp_f {
        t if (55.0..=75.0).contains(&t) => 10.0,
        t if (40.0..55.0).contains(&t) || (75.0..=85.0).contains(&t) => 6.0,
        t if (32.0..40.0).contains(&t) || (85.0..=95.0).contains(&t) => 3.0,
        _ => 1.0,
    };

    wind + precip + air
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn reading(temp: Option<f64>) -> Vec<SensorReading> {
        vec![SensorReading {
            station_id: "06041000".into(),
            timestamp: Utc.with_ymd_and_hms(2025, 6, 10, 14, 0, 0).unwrap(),
            water_temp_f: temp,
            discharge_cfs: Some(700.0),
            gage_height_ft: None,
        }]
    }

    fn calm_weather() -> WeatherSnapshot {
        WeatherSnapshot {
            timestamp: Utc.with_ymd_and_hms(2025, 6, 10, 14, 0, 0).unwrap(),
            air_temp_f: 65.0,
            cloud_cover_percent: 50.0,
            precip_probability: 10.0,
            wind_speed_mph: 4.0,
            is_daylight: true,
        }
    }

    fn prediction(confidence: Confidence) -> HatchPrediction {
        HatchPrediction {
            hatch_id: "test".into(),
            name: "Test".into(),
            probability: 0.7,
            confidence,
            rationale: String::new(),
        }
    }

    #[test]
    fn test_optimal_conditions_score_the_maximum() {
        let predictions = vec![
            prediction(Confidence::High),
            prediction(Confidence::High),
            prediction(Confidence::High),
            prediction(Confidence::Medium),
            prediction(Confidence::Medium),
        ];
        // 40 (temp) + 30 (hatches) + 30 (comfort) = 100.
        let s = score(&reading(Some(55.0)), Some(&calm_weather()), &predictions);
        assert_eq!(s, 100);
    }

    #[test]
    fn test_lethal_temperature_zeroes_the_temp_component() {
        let s = score(&reading(Some(78.0)), Some(&calm_weather()), &[]);
        // Only the comfort band remains.
        assert_eq!(s, 30);
    }

    #[test]
    fn test_missing_temperature_is_neutral_not_zero() {
        let with_none = score(&reading(None), Some(&calm_weather()), &[]);
        let lethal = score(&reading(Some(80.0)), Some(&calm_weather()), &[]);
        let optimal = score(&reading(Some(55.0)), Some(&calm_weather()), &[]);
        assert!(with_none > lethal, "missing data must not score as worst case");
        assert!(with_none < optimal, "missing data must not score as best case");
        assert_eq!(with_none, 50); // 20 neutral + 30 comfort
    }

    #[test]
    fn test_missing_weather_is_neutral_midpoint() {
        let s = score(&reading(Some(55.0)), None, &[]);
        assert_eq!(s, 55); // 40 temp + 15 neutral comfort
    }

    #[test]
    fn test_hatch_density_has_diminishing_returns() {
        let three: Vec<_> = (0..3).map(|_| prediction(Confidence::High)).collect();
        let six: Vec<_> = (0..6).map(|_| prediction(Confidence::High)).collect();

        let s3 = score(&reading(Some(55.0)), None, &three);
        let s6 = score(&reading(Some(55.0)), None, &six);

        // 3 high = 24; 6 high = 24 + 3*2 = 30 (capped).
        assert_eq!(s3, 40 + 24 + 15);
        assert_eq!(s6, 40 + 30 + 15);
    }

    #[test]
    fn test_hatch_density_never_exceeds_cap() {
        let many: Vec<_> = (0..12).map(|_| prediction(Confidence::High)).collect();
        let s = score(&reading(Some(55.0)), Some(&calm_weather()), &many);
        assert_eq!(s, 100);
    }

    #[test]
    fn test_temperature_ramp_is_monotone_on_the_cold_side() {
        let mut last = -1.0;
        for t in [34.0, 38.0, 42.0, 46.0, 50.0] {
            let s = temperature_score(Some(t));
            assert!(s >= last, "temp score should not decrease toward optimal");
            last = s;
        }
        assert_eq!(temperature_score(Some(33.0)), 0.0);
        assert_eq!(temperature_score(Some(50.0)), 40.0);
    }

    #[test]
    fn test_harsh_weather_floors_comfort() {
        let harsh = WeatherSnapshot {
            timestamp: Utc.with_ymd_and_hms(2025, 1, 10, 14, 0, 0).unwrap(),
            air_temp_f: 18.0,
            cloud_cover_percent: 100.0,
            precip_probability: 95.0,
            wind_speed_mph: 28.0,
            is_daylight: true,
        };
        // 1 + 1 + 1 = 3.
        let s = score(&reading(Some(55.0)), Some(&harsh), &[]);
        assert_eq!(s, 43);
    }
}

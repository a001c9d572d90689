//! USGS Instantaneous Values client.
//!
//! Fetches live gauge data from `waterservices.usgs.gov` and folds the
//! per-parameter time series into one [`SensorReading`] per station.
//! Parameters requested: 00010 (water temperature, °C), 00060 (discharge,
//! cfs), 00065 (gage height, ft).

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use common::sources::SensorSource;
use common::{Error, SensorReading};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

const PARAM_WATER_TEMP: &str = "00010";
const PARAM_DISCHARGE: &str = "00060";
const PARAM_GAGE_HEIGHT: &str = "00065";

/// USGS sentinel for "no data" (e.g. ice-affected sensors).
const MISSING_SENTINEL: f64 = -99999.0;

/// USGS water services client with connection pooling.
#[derive(Debug, Clone)]
pub struct UsgsClient {
    client: reqwest::Client,
    base_url: String,
}

// ── USGS response types ───────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct IvResponse {
    pub value: IvValue,
}

#[derive(Debug, Deserialize)]
pub struct IvValue {
    #[serde(rename = "timeSeries", default)]
    pub time_series: Vec<TimeSeries>,
}

#[derive(Debug, Deserialize)]
pub struct TimeSeries {
    #[serde(rename = "sourceInfo")]
    pub source_info: SourceInfo,
    pub variable: Variable,
    #[serde(default)]
    pub values: Vec<ValuesBlock>,
}

#[derive(Debug, Deserialize)]
pub struct SourceInfo {
    #[serde(rename = "siteCode", default)]
    pub site_code: Vec<CodeValue>,
}

#[derive(Debug, Deserialize)]
pub struct Variable {
    #[serde(rename = "variableCode", default)]
    pub variable_code: Vec<CodeValue>,
}

#[derive(Debug, Deserialize)]
pub struct CodeValue {
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct ValuesBlock {
    #[serde(default)]
    pub value: Vec<TimedValue>,
}

#[derive(Debug, Deserialize)]
pub struct TimedValue {
    pub value: String,
    #[serde(rename = "dateTime")]
    pub date_time: DateTime<FixedOffset>,
}

// ── Implementation ────────────────────────────────────────────────────

impl UsgsClient {
    pub fn new() -> Self {
        Self::with_base_url("https://waterservices.usgs.gov/nwis/iv".into())
    }

    pub fn with_base_url(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("hatchcast/0.1 (river conditions; contact@example.com)")
            .pool_max_idle_per_host(4)
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("failed to build USGS HTTP client");

        Self { client, base_url }
    }

    /// Fetch the raw instantaneous-values document for a station set.
    pub async fn fetch_instantaneous(&self, station_ids: &[String]) -> Result<IvResponse, Error> {
        let url = format!(
            "{}/?format=json&sites={}&parameterCd={},{},{}&siteStatus=active",
            self.base_url,
            station_ids.join(","),
            PARAM_WATER_TEMP,
            PARAM_DISCHARGE,
            PARAM_GAGE_HEIGHT,
        );

        debug!("Fetching USGS instantaneous values: {}", url);

        let resp = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| Error::Usgs(format!("HTTP error for {:?}: {}", station_ids, e)))?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Usgs(format!(
                "USGS returned {}: {}",
                status,
                &body[..body.len().min(500)]
            )));
        }

        let data: IvResponse = resp
            .json()
            .await
            .map_err(|e| Error::Usgs(format!("JSON parse error: {}", e)))?;

        debug!("Got {} time series", data.value.time_series.len());
        Ok(data)
    }
}

impl Default for UsgsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SensorSource for UsgsClient {
    async fn fetch_readings(&self, station_ids: &[String]) -> Result<Vec<SensorReading>, Error> {
        let response = self.fetch_instantaneous(station_ids).await?;
        Ok(readings_from_response(&response))
    }
}

/// Fold the per-parameter time series into one reading per station,
/// keeping the newest value of each parameter. Sentinel values are
/// treated as absent, never as zeros.
pub fn readings_from_response(response: &IvResponse) -> Vec<SensorReading> {
    let mut by_station: BTreeMap<String, SensorReading> = BTreeMap::new();

    for series in &response.value.time_series {
        let Some(station_id) = series.source_info.site_code.first().map(|c| c.value.clone())
        else {
            continue;
        };
        let Some(param) = series.variable.variable_code.first().map(|c| c.value.as_str())
        else {
            continue;
        };

        let latest = series
            .values
            .iter()
            .flat_map(|block| block.value.iter())
            .filter_map(|tv| {
                let parsed = tv.value.trim().parse::<f64>().ok()?;
                if parsed <= MISSING_SENTINEL {
                    return None;
                }
                Some((tv.date_time.with_timezone(&Utc), parsed))
            })
            .max_by_key(|(ts, _)| *ts);

        let Some((timestamp, raw)) = latest else {
            continue;
        };

        let reading = by_station
            .entry(station_id.clone())
            .or_insert_with(|| SensorReading {
                station_id,
                timestamp,
                water_temp_f: None,
                discharge_cfs: None,
                gage_height_ft: None,
            });
        reading.timestamp = reading.timestamp.max(timestamp);

        match param {
            // USGS reports water temperature in Celsius.
            PARAM_WATER_TEMP => reading.water_temp_f = Some(raw * 9.0 / 5.0 + 32.0),
            PARAM_DISCHARGE => reading.discharge_cfs = Some(raw),
            PARAM_GAGE_HEIGHT => reading.gage_height_ft = Some(raw),
            _ => {}
        }
    }

    by_station.into_values().collect()
}

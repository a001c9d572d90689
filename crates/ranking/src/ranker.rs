//! Location ranking engine.
//!
//! Fans one scoring task out per catalog location through the bounded
//! executor, drops (and logs) locations whose upstream fetches failed,
//! and returns a deterministically ordered, truncated ranking. A ranking
//! call never fails just because some upstream sources were degraded —
//! total outage surfaces as zero results, not as an error.

use cache::{CacheStore, ReadingsFetcher, WeatherFetcher};
use chrono::{DateTime, Utc};
use common::sources::{SensorSource, WeatherSource};
use common::{
    Error, Location, LocationScore, RankingResponse, SensorReading, Tier, WeatherSnapshot,
};
use executor::{run_bounded, Outcome};
use tracing::{debug, info, warn};

use crate::scorer;

/// How many hatch candidates each location carries in its result.
const TOP_HATCHES: usize = 3;

/// The aggregation core: cache-aside fetchers, a location catalog, and a
/// concurrency ceiling, wired together at process start.
pub struct RankingEngine<S, RC, W, WC> {
    readings: ReadingsFetcher<S, RC>,
    weather: WeatherFetcher<W, WC>,
    locations: Vec<Location>,
    concurrency: usize,
}

impl<S, RC, W, WC> RankingEngine<S, RC, W, WC>
where
    S: SensorSource,
    RC: CacheStore<Vec<SensorReading>>,
    W: WeatherSource,
    WC: CacheStore<WeatherSnapshot>,
{
    /// Construct the engine, failing fast on programming errors: a
    /// concurrency ceiling below 1 or an empty catalog.
    pub fn new(
        readings: ReadingsFetcher<S, RC>,
        weather: WeatherFetcher<W, WC>,
        locations: Vec<Location>,
        concurrency: usize,
    ) -> Result<Self, Error> {
        if concurrency == 0 {
            return Err(Error::InvalidInput(
                "concurrency must be at least 1".into(),
            ));
        }
        if locations.is_empty() {
            return Err(Error::InvalidInput(
                "location catalog must not be empty".into(),
            ));
        }
        Ok(Self {
            readings,
            weather,
            locations,
            concurrency,
        })
    }

    /// Rank all catalog locations and return the top `top_n`.
    pub async fn rank(&self, as_of: DateTime<Utc>, top_n: usize) -> Result<RankingResponse, Error> {
        info!(
            "Ranking {} locations (concurrency {})",
            self.locations.len(),
            self.concurrency
        );

        let tasks: Vec<_> = self
            .locations
            .iter()
            .map(|loc| self.score_location(loc, as_of))
            .collect();
        let outcomes = run_bounded(tasks, self.concurrency).await?;

        let mut scored: Vec<LocationScore> = Vec::with_capacity(outcomes.len());
        for (location, outcome) in self.locations.iter().zip(outcomes) {
            match outcome {
                Outcome::Fulfilled(s) => scored.push(s),
                Outcome::Rejected(e) => {
                    warn!("dropping {} from ranking: {}", location.id, e);
                }
            }
        }

        // Score descending, then tier (best first), then id — fully
        // deterministic even when scores collide.
        scored.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.tier.cmp(&b.tier))
                .then_with(|| a.location_id.cmp(&b.location_id))
        });
        scored.truncate(top_n);

        Ok(RankingResponse {
            count: scored.len(),
            locations: scored,
            generated_at: Utc::now(),
        })
    }

    /// Score a single location: fetch readings, fetch weather if the
    /// location has coordinates, predict hatches, compute the composite.
    async fn score_location(
        &self,
        location: &Location,
        as_of: DateTime<Utc>,
    ) -> Result<LocationScore, Error> {
        let readings = if location.sensor_station_ids.is_empty() {
            Vec::new()
        } else {
            self.readings.fetch(&location.sensor_station_ids).await?.data
        };

        let weather = match location.coordinates {
            Some(coords) => Some(self.weather.fetch(coords).await?.data),
            None => None,
        };

        let predictions = hatch::predict(&readings, weather.as_ref(), as_of);
        let score = scorer::score(&readings, weather.as_ref(), &predictions);

        debug!(
            "{}: score={} hatches={} readings={}",
            location.id,
            score,
            predictions.len(),
            readings.len()
        );

        Ok(LocationScore {
            location_id: location.id.clone(),
            name: location.name.clone(),
            score,
            tier: Tier::from_score(score),
            readings,
            weather,
            top_hatches: predictions.into_iter().take(TOP_HATCHES).collect(),
        })
    }
}

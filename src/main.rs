//! Hatchcast: fly-fishing hatch and conditions forecaster.
//!
//! Single-binary Tokio application that:
//! 1. Fetches live gauge readings from USGS water services
//! 2. Fetches current weather from Open-Meteo
//! 3. Predicts likely insect hatches per river location
//! 4. Scores and ranks locations by fishability

mod config;

use chrono::{DateTime, Utc};
use clap::Parser;
use tracing::{error, info};

use cache::{MemoryStore, ReadingsFetcher, WeatherFetcher};
use ranking::RankingEngine;
use usgs_client::UsgsClient;
use weather_client::OpenMeteoClient;

/// Fly-fishing hatch and conditions forecaster
#[derive(Parser)]
#[command(name = "hatchcast", about = "Rank rivers by hatch activity and conditions")]
struct Cli {
    /// How many locations to show (overrides config).
    #[arg(long)]
    top: Option<usize>,

    /// Evaluate as of this RFC 3339 instant instead of now.
    #[arg(long)]
    as_of: Option<String>,

    /// Emit the full ranking as JSON instead of the text report.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "hatchcast=info,cache=info,ranking=info,usgs_client=info,weather_client=info".into()
            }),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();

    info!("🎣 Hatchcast starting up...");

    // Load configuration.
    let cfg = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let top_n = cli.top.unwrap_or(cfg.top_n);
    let as_of: DateTime<Utc> = match &cli.as_of {
        Some(raw) => match DateTime::parse_from_rfc3339(raw) {
            Ok(t) => t.with_timezone(&Utc),
            Err(e) => {
                error!("--as-of must be RFC 3339 (e.g. 2025-04-15T14:00:00Z): {}", e);
                std::process::exit(1);
            }
        },
        None => Utc::now(),
    };

    info!(
        "Locations: {:?}",
        cfg.locations.iter().map(|l| &l.id).collect::<Vec<_>>()
    );
    info!(
        "Settings: concurrency={}, top_n={}, as_of={}",
        cfg.concurrency, top_n, as_of
    );

    let locations: Vec<_> = cfg.locations.iter().map(|l| l.to_location()).collect();

    let engine = match RankingEngine::new(
        ReadingsFetcher::new(UsgsClient::new(), MemoryStore::new()),
        WeatherFetcher::new(OpenMeteoClient::new(), MemoryStore::new()),
        locations,
        cfg.concurrency,
    ) {
        Ok(e) => e,
        Err(e) => {
            error!("Engine initialization failed: {}", e);
            std::process::exit(1);
        }
    };

    let response = match engine.rank(as_of, top_n).await {
        Ok(r) => r,
        Err(e) => {
            error!("Ranking failed: {}", e);
            std::process::exit(1);
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&response) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                error!("Failed to serialize ranking: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    if response.locations.is_empty() {
        info!("No locations could be scored — all upstream sources were unavailable.");
        return;
    }

    info!("Top {} of {} scored locations:", top_n, response.count);
    for (rank, loc) in response.locations.iter().enumerate() {
        let water = common::latest_water_temp(&loc.readings)
            .map(|t| format!("{:.0}°F", t))
            .unwrap_or_else(|| "n/a".into());
        info!(
            "#{} {} — {}/100 ({:?}), water {}",
            rank + 1,
            loc.name,
            loc.score,
            loc.tier,
            water
        );
        for hatch in &loc.top_hatches {
            info!(
                "     {} p={:.2} ({:?}) — {}",
                hatch.name, hatch.probability, hatch.confidence, hatch.rationale
            );
        }
    }

    info!("Hatchcast done.");
}

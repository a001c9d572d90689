//! Configuration loader — merges defaults, config.toml, and env vars.

use common::config::HatchcastConfig;
use common::Error;
use std::path::Path;

fn parse_positive_usize(raw: &str, env_name: &str) -> Result<usize, Error> {
    let parsed = raw
        .trim()
        .parse::<usize>()
        .map_err(|_| Error::Config(format!("{env_name} must be an integer > 0")))?;
    if parsed == 0 {
        return Err(Error::Config(format!("{env_name} must be an integer > 0")));
    }
    Ok(parsed)
}

fn validate_config(config: &HatchcastConfig) -> Result<(), Error> {
    let mut issues: Vec<String> = Vec::new();

    if config.locations.is_empty() {
        issues.push("locations must contain at least one location".into());
    }
    if config.concurrency == 0 {
        issues.push("concurrency must be > 0".into());
    }
    if config.top_n == 0 {
        issues.push("top_n must be > 0".into());
    }

    for loc in &config.locations {
        if loc.id.trim().is_empty() {
            issues.push(format!("location {:?} has an empty id", loc.name));
        }
        if loc.station_ids.is_empty() && (loc.lat.is_none() || loc.lon.is_none()) {
            issues.push(format!(
                "location {} has neither stations nor coordinates; it could never be scored",
                loc.id
            ));
        }
        if loc.lat.is_some() != loc.lon.is_some() {
            issues.push(format!(
                "location {} has only one of lat/lon; set both or neither",
                loc.id
            ));
        }
    }

    let mut seen = std::collections::HashSet::new();
    for loc in &config.locations {
        if !seen.insert(loc.id.as_str()) {
            issues.push(format!("duplicate location id {}", loc.id));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "Invalid config:\n - {}",
            issues.join("\n - ")
        )))
    }
}

/// Load configuration from the optional config file and environment.
pub fn load_config() -> Result<HatchcastConfig, Error> {
    // 1. Load .env file from project root or parent directories.
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env file loaded: {}", e);
    }

    // 2. Start with defaults.
    let mut config = HatchcastConfig::default();

    // 3. Try loading config.toml if it exists.
    let config_path = Path::new("config.toml");
    if config_path.exists() {
        let contents = std::fs::read_to_string(config_path)
            .map_err(|e| Error::Config(format!("Failed to read config.toml: {}", e)))?;
        config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config.toml: {}", e)))?;
    }

    // 4. Override with environment variables (highest priority).
    if let Ok(raw) = std::env::var("HATCHCAST_CONCURRENCY") {
        config.concurrency = parse_positive_usize(&raw, "HATCHCAST_CONCURRENCY")?;
    }
    if let Ok(raw) = std::env::var("HATCHCAST_TOP_N") {
        config.top_n = parse_positive_usize(&raw, "HATCHCAST_TOP_N")?;
    }

    validate_config(&config)?;

    Ok(config)
}

use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use crate::cache::DEFAULT_TTL_MS;
use crate::errors::ConfigError;

#[derive(Deserialize, Debug, Clone)]
pub struct Location {
    pub name: String,
    pub lat: f64,
    pub long: f64,
}

#[derive(Deserialize, Debug)]
pub struct CacheParameters {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_coord_precision")]
    pub coord_precision: usize,
}

impl Default for CacheParameters {
    fn default() -> Self {
        Self { ttl_secs: default_ttl_secs(), coord_precision: default_coord_precision() }
    }
}

#[derive(Deserialize, Debug)]
pub struct ForecastParameters {
    #[serde(default)]
    pub detail: bool,
    #[serde(default = "default_true")]
    pub history_mode: bool,
    #[serde(default = "default_history_len")]
    pub history_len: usize,
}

impl Default for ForecastParameters {
    fn default() -> Self {
        Self { detail: false, history_mode: true, history_len: default_history_len() }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct SourceParameters {
    /// Fixed seed for the demo source, random if absent
    pub seed: Option<u64>,
}

#[derive(Deserialize, Debug)]
pub struct WorkerParameters {
    pub interval_secs: u64,
    pub max_rounds: Option<u32>,
}

#[derive(Deserialize, Debug)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
    #[serde(default)]
    pub print_json: bool,
}

#[derive(Deserialize, Debug)]
pub struct Config {
    pub general: General,
    #[serde(default)]
    pub cache: CacheParameters,
    #[serde(default)]
    pub forecast: ForecastParameters,
    #[serde(default)]
    pub source: SourceParameters,
    pub worker: WorkerParameters,
    pub locations: Vec<Location>,
}

fn default_ttl_secs() -> u64 {
    (DEFAULT_TTL_MS / 1000) as u64
}

fn default_coord_precision() -> usize {
    2
}

fn default_history_len() -> usize {
    48
}

fn default_true() -> bool {
    true
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(config_path)?;

    parse_config(&toml)
}

/// Parses and validates a configuration document
///
/// # Arguments
///
/// * 'toml' - the configuration as a toml string
pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml)?;

    if config.locations.is_empty() {
        return Err(ConfigError::from("at least one location must be configured"));
    }
    for l in &config.locations {
        if !(-90.0..=90.0).contains(&l.lat) || !(-180.0..=180.0).contains(&l.long) {
            return Err(ConfigError::Invalid(format!("coordinates out of range for {}: {}, {}", l.name, l.lat, l.long)));
        }
    }
    if config.cache.ttl_secs == 0 {
        return Err(ConfigError::from("cache ttl_secs must be greater than zero"));
    }
    if config.cache.coord_precision > 6 {
        return Err(ConfigError::from("cache coord_precision must be at most 6"));
    }

    Ok(config)
}

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use chrono::TimeDelta;
use log::info;
use crate::breakpoints;
use crate::cache::ResponseCache;
use crate::config::Config;
use crate::errors::AirCastInitError;
use crate::forecast::{BoundedRandomWalk, ForecastStrategy};
use crate::manager_demo::DemoSource;
use crate::models::observation::{HistorySample, Observation};
use crate::source::AirQualitySource;

/// Holds everything the worker needs to build reports
pub struct Mgr {
    pub cache: Arc<ResponseCache<Observation>>,
    pub history_cache: Arc<ResponseCache<Vec<Observation>>>,
    pub source: Box<dyn AirQualitySource>,
    pub strategy: Box<dyn ForecastStrategy>,
    pub history: HashMap<String, VecDeque<HistorySample>>,
    pub coord_precision: usize,
    pub history_len: usize,
    pub history_mode: bool,
    pub detail: bool,
}

/// Validates static tables and builds the manager struct from configuration
///
/// # Arguments
///
/// * 'config' - the loaded configuration
pub fn init(config: &Config) -> Result<Mgr, AirCastInitError> {
    breakpoints::validate_tables().map_err(AirCastInitError)?;

    let ttl = TimeDelta::seconds(config.cache.ttl_secs as i64);
    let source = match config.source.seed {
        Some(seed) => DemoSource::with_seed(seed),
        None => DemoSource::new(),
    };
    let strategy = BoundedRandomWalk;

    info!("source: {}, forecast strategy: {}, cache ttl: {}s", source.name(), strategy.name(), ttl.num_seconds());

    Ok(Mgr {
        cache: Arc::new(ResponseCache::new(ttl)),
        history_cache: Arc::new(ResponseCache::new(ttl)),
        source: Box::new(source),
        strategy: Box::new(strategy),
        history: HashMap::new(),
        coord_precision: config.cache.coord_precision,
        history_len: config.forecast.history_len,
        history_mode: config.forecast.history_mode,
        detail: config.forecast.detail,
    })
}

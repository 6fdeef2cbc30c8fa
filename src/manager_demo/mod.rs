use std::sync::Mutex;
use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use rand::Rng;
use rand::rngs::StdRng;
use rand::SeedableRng;
use crate::errors::SourceError;
use crate::forecast::synthetic_reading;
use crate::models::aqi_value::AqiValue;
use crate::models::observation::Observation;
use crate::models::pollutant::{Pollutant, PollutantReading};
use crate::source::AirQualitySource;

/// Upper PM2.5 bounds (µg/m³) of the provider index bands 1 to 4, anything above is 5
const INDEX_BANDS: [f64; 4] = [10.0, 25.0, 50.0, 75.0];

/// Stands in for the upstream air quality provider by generating readings within
/// the synthetic pollutant ranges. The provider 1-5 index is derived from PM2.5.
pub struct DemoSource {
    rng: Mutex<StdRng>,
}

impl DemoSource {
    /// Returns a demo source seeded from the operating system
    pub fn new() -> DemoSource {
        DemoSource { rng: Mutex::new(StdRng::from_os_rng()) }
    }

    /// Returns a demo source with a fixed seed, producing repeatable readings
    ///
    /// # Arguments
    ///
    /// * 'seed' - the seed
    pub fn with_seed(seed: u64) -> DemoSource {
        DemoSource { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }

    fn observation(&self, timestamp: DateTime<Utc>) -> Result<Observation, SourceError> {
        let mut rng = self.rng.lock().map_err(|e| SourceError::Upstream(e.to_string()))?;
        let reading = synthetic_reading(&mut *rng);

        // an occasional clean-air hour keeps the lower bands in play
        let reading = if rng.random_bool(0.2) { scaled(&reading, 0.3)? } else { reading };

        let pm25 = reading.get(Pollutant::Pm25).unwrap_or_default();
        Ok(Observation { timestamp, index: AqiValue::Qualitative(provider_index(pm25)), reading })
    }
}

impl Default for DemoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl AirQualitySource for DemoSource {
    fn name(&self) -> &'static str {
        "demo"
    }

    fn fetch_current(&self, _lat: f64, _long: f64) -> Result<Observation, SourceError> {
        self.observation(Utc::now())
    }

    fn fetch_history(&self, _lat: f64, _long: f64, hours: usize) -> Result<Vec<Observation>, SourceError> {
        let now = Utc::now()
            .duration_trunc(TimeDelta::hours(1))
            .map_err(|e| SourceError::Upstream(e.to_string()))?;

        (1..=hours)
            .rev()
            .map(|h| self.observation(now - TimeDelta::hours(h as i64)))
            .collect()
    }
}

/// Maps a PM2.5 concentration in µg/m³ to the provider's 1-5 index
///
/// # Arguments
///
/// * 'pm25' - PM2.5 concentration in µg/m³
pub fn provider_index(pm25: f64) -> u8 {
    INDEX_BANDS.iter().take_while(|&&band| pm25 >= band).count() as u8 + 1
}

fn scaled(reading: &PollutantReading, factor: f64) -> Result<PollutantReading, SourceError> {
    Ok(PollutantReading::new(reading.iter().map(|(p, v)| (p, v * factor)))?)
}

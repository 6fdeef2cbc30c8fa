//! Forecast synthesis.
//!
//! There is no trained model behind these forecasts. `BoundedRandomWalk` produces
//! plausible looking series from a correlated random walk on the qualitative 1-5
//! scale, which is what the service falls back to when no live model output is
//! available. Other strategies can be plugged in through `ForecastStrategy`.

use chrono::{DateTime, TimeDelta, Utc};
use log::debug;
use rand::Rng;
use crate::insights;
use crate::models::aqi_value::AqiValue;
use crate::models::forecast::{ForecastPoint, ForecastSeries};
use crate::models::observation::HistorySample;
use crate::models::pollutant::{Pollutant, PollutantReading};

/// Hours between two forecast points
pub const CADENCE_HOURS: i64 = 3;

/// Number of forecast points, 48 hours ahead
pub const FORECAST_POINTS: usize = 16;

/// Cosmetic method labels
const METHODS: [&str; 4] = [
    "Random Forest Algorithm",
    "Neural Network Model",
    "LSTM Time Series Model",
    "Gradient Boosting Ensemble",
];

/// Per step drift bound of the walk
const DRIFT: f64 = 0.15;

/// Uniform ranges used for synthetic pollutant snapshots, µg/m³ except CO in mg/m³
const SYNTHETIC_RANGES: [(Pollutant, f64, f64); 6] = [
    (Pollutant::Pm25, 10.0, 60.0),
    (Pollutant::Pm10, 15.0, 95.0),
    (Pollutant::No2, 20.0, 120.0),
    (Pollutant::O3, 25.0, 85.0),
    (Pollutant::Co, 0.5, 3.5),
    (Pollutant::So2, 5.0, 25.0),
];

/// What a caller asks a forecast strategy for
#[derive(Debug, Clone, Copy, Default)]
pub struct ForecastRequest<'a> {
    /// Current provider index. Accepted but not used to seed the walk.
    pub anchor: Option<AqiValue>,
    /// Attach synthetic pollutant snapshots to every point
    pub detail: bool,
    /// Past samples for the location, None runs in fallback mode
    pub history: Option<&'a [HistorySample]>,
}

/// A source of forecast series
pub trait ForecastStrategy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Produces a forecast starting at `now`
    ///
    /// # Arguments
    ///
    /// * 'request' - anchor, detail flag and optional history
    /// * 'now' - invocation time, points follow at a fixed cadence
    fn forecast(&self, request: &ForecastRequest, now: DateTime<Utc>) -> ForecastSeries;
}

/// Synthetic forecast from a bounded, correlated random walk
#[derive(Debug, Default)]
pub struct BoundedRandomWalk;

impl ForecastStrategy for BoundedRandomWalk {
    fn name(&self) -> &'static str {
        "bounded-random-walk"
    }

    fn forecast(&self, request: &ForecastRequest, now: DateTime<Utc>) -> ForecastSeries {
        self.synthesize_with(&mut rand::rng(), request, now)
    }
}

impl BoundedRandomWalk {
    /// Runs the walk with the given random source.
    ///
    /// The walk starts from a random base in 2..=4 regardless of any anchor. Each step
    /// draws a variation in [-1, 1], emits `clamp(round(base + variation), 1, 5)` and
    /// then lets the base drift by at most 0.15 (kept within 1..=5), so consecutive
    /// points are correlated.
    ///
    /// # Arguments
    ///
    /// * 'rng' - random source
    /// * 'request' - anchor, detail flag and optional history
    /// * 'now' - invocation time
    pub fn synthesize_with<R: Rng + ?Sized>(&self, rng: &mut R, request: &ForecastRequest, now: DateTime<Utc>) -> ForecastSeries {
        debug!("synthesizing forecast, anchor {:?} is not used to seed the walk", request.anchor);

        let max = AqiValue::QUALITATIVE_MAX as f64;
        let mut base = rng.random_range(2..=4) as f64;
        let mut predictions: Vec<ForecastPoint> = Vec::with_capacity(FORECAST_POINTS);

        for step in 1..=FORECAST_POINTS {
            let variation: f64 = rng.random_range(-1.0..=1.0);
            let aqi = (base + variation).round().clamp(1.0, max) as u8;

            let pollutants = if request.detail { Some(synthetic_reading(rng)) } else { None };

            predictions.push(ForecastPoint {
                timestamp: now + TimeDelta::hours(CADENCE_HOURS * step as i64),
                aqi: AqiValue::Qualitative(aqi),
                pollutants,
            });

            base = (base + rng.random_range(-DRIFT..=DRIFT)).clamp(1.0, max);
        }

        let method = METHODS[rng.random_range(0..METHODS.len())];

        let confidence = match request.history {
            Some(history) => insights::history_confidence(history, &predictions),
            None => (80.0 + rng.random_range(0.0..15.0_f64)).floor() as u8,
        };

        ForecastSeries {
            insights: insights::generate_insights(request.history, &predictions),
            data_quality: insights::data_quality(request.history).to_string(),
            timeframe: format!("{} hours", CADENCE_HOURS * FORECAST_POINTS as i64),
            method: method.to_string(),
            confidence,
            predictions,
        }
    }
}

/// Draws a pollutant snapshot with every pollutant uniformly within its synthetic range
///
/// # Arguments
///
/// * 'rng' - random source
pub fn synthetic_reading<R: Rng + ?Sized>(rng: &mut R) -> PollutantReading {
    let values = SYNTHETIC_RANGES
        .iter()
        .map(|&(p, low, high)| {
            let value: f64 = rng.random_range(low..=high);
            let decimals = if p == Pollutant::Co { 100.0 } else { 10.0 };
            (p, (value * decimals).round() / decimals)
        })
        .collect::<Vec<(Pollutant, f64)>>();

    // every range is finite and non-negative
    PollutantReading::new(values).unwrap_or_default()
}

use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::models::aqi_value::AqiValue;
use crate::models::pollutant::PollutantReading;

/// Current conditions as delivered by an upstream source, this is what the
/// response cache holds
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Observation {
    pub timestamp: DateTime<Utc>,
    pub index: AqiValue,
    pub reading: PollutantReading,
}

/// One retained sample of past conditions for a location
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct HistorySample {
    pub timestamp: DateTime<Utc>,
    pub index: u8,
    pub pm2_5: f64,
}

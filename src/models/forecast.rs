use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::models::aqi_value::AqiValue;
use crate::models::pollutant::PollutantReading;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ForecastPoint {
    pub timestamp: DateTime<Utc>,
    pub aqi: AqiValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pollutants: Option<PollutantReading>,
}

/// A synthesized forecast, created fresh for every request
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ForecastSeries {
    pub predictions: Vec<ForecastPoint>,
    pub timeframe: String,
    pub method: String,
    pub confidence: u8,
    pub insights: Vec<String>,
    #[serde(rename = "dataQuality")]
    pub data_quality: String,
}

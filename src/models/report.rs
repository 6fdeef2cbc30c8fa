use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::category::{Category, PollutantStatus};
use crate::models::aqi_value::AqiValue;
use crate::models::forecast::ForecastSeries;
use crate::models::pollutant::Pollutant;

#[derive(Serialize, Debug, Clone)]
pub struct PollutantDetail {
    pub pollutant: Pollutant,
    pub concentration: f64,
    pub sub_index: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PollutantStatus>,
}

#[derive(Serialize, Debug, Clone)]
pub struct AirQualityReport {
    pub location: String,
    pub lat: f64,
    pub long: f64,
    pub observed: DateTime<Utc>,
    pub cached: bool,
    pub provider_index: AqiValue,
    pub provider_category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_index: Option<AqiValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant_pollutant: Option<Pollutant>,
    pub pollutants: Vec<PollutantDetail>,
    pub forecast: ForecastSeries,
}

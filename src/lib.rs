//! Air quality reporting and forecast synthesis.
//!
//! Combines a provider-native 1-5 air quality index with an EPA 0-500 AQI computed
//! locally from raw pollutant concentrations, and fronts upstream fetches with a
//! short lived response cache.

pub mod aqi;
pub mod breakpoints;
pub mod cache;
pub mod category;
pub mod config;
pub mod errors;
pub mod forecast;
pub mod initialization;
pub mod insights;
pub mod logging;
pub mod manager_demo;
pub mod models;
pub mod report;
pub mod source;
pub mod worker;

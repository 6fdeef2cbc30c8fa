pub mod aqi_value;
pub mod forecast;
pub mod observation;
pub mod pollutant;
pub mod report;

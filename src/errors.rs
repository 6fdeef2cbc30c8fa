use std::fmt;
use std::fmt::Formatter;
use thiserror::Error;

/// Errors signalled by the AQI converter
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AqiError {
    #[error("unknown pollutant: {0}")]
    UnknownPollutant(String),
    #[error("invalid concentration for {pollutant}: {value}")]
    InvalidConcentration { pollutant: String, value: f64 },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("ConfigError::Io: {0}")]
    Io(#[from] std::io::Error),
    #[error("ConfigError::Document: {0}")]
    Document(#[from] toml::de::Error),
    #[error("ConfigError::Invalid: {0}")]
    Invalid(String),
}
impl From<&str> for ConfigError {
    fn from(e: &str) -> Self { ConfigError::Invalid(e.to_string()) }
}

#[derive(Error, Debug)]
#[error("error setting up logging: {0}")]
pub struct LoggingError(pub String);
impl From<log4rs::config::runtime::ConfigErrors> for LoggingError {
    fn from(e: log4rs::config::runtime::ConfigErrors) -> Self { LoggingError(e.to_string()) }
}
impl From<log::SetLoggerError> for LoggingError {
    fn from(e: log::SetLoggerError) -> Self { LoggingError(e.to_string()) }
}
impl From<std::io::Error> for LoggingError {
    fn from(e: std::io::Error) -> Self { LoggingError(e.to_string()) }
}

/// Failure reported by an upstream air quality source
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("SourceError::Upstream: {0}")]
    Upstream(String),
    #[error("SourceError::Document: {0}")]
    Document(String),
}
impl From<AqiError> for SourceError {
    fn from(e: AqiError) -> Self { SourceError::Document(e.to_string()) }
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("ReportError::Source: {0}")]
    Source(#[from] SourceError),
    #[error("ReportError::Conversion: {0}")]
    Conversion(#[from] AqiError),
}

pub struct AirCastInitError(pub String);

impl fmt::Display for AirCastInitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "AirCastInitError: {}", self.0)
    }
}
impl fmt::Debug for AirCastInitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "AirCastInitError: {}", self.0)
    }
}
impl std::error::Error for AirCastInitError {}

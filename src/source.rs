use crate::errors::SourceError;
use crate::models::observation::Observation;

/// Upstream provider of current and past air quality for a coordinate.
///
/// Network transport lives behind this trait, the core never performs I/O itself.
pub trait AirQualitySource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Fetches current conditions
    ///
    /// # Arguments
    ///
    /// * 'lat' - latitude
    /// * 'long' - longitude
    fn fetch_current(&self, lat: f64, long: f64) -> Result<Observation, SourceError>;

    /// Fetches hourly observations for the past hours, oldest first
    ///
    /// # Arguments
    ///
    /// * 'lat' - latitude
    /// * 'long' - longitude
    /// * 'hours' - how many hours back to fetch
    fn fetch_history(&self, lat: f64, long: f64, hours: usize) -> Result<Vec<Observation>, SourceError>;
}

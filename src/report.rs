use std::collections::VecDeque;
use std::sync::Arc;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use crate::aqi;
use crate::cache::{cache_key, Endpoint};
use crate::category::{classify, classify_standard, pollutant_status};
use crate::config::Location;
use crate::errors::ReportError;
use crate::forecast::ForecastRequest;
use crate::initialization::Mgr;
use crate::models::aqi_value::AqiValue;
use crate::models::observation::{HistorySample, Observation};
use crate::models::report::{AirQualityReport, PollutantDetail};
use crate::models::pollutant::Pollutant;

/// Builds an air quality report for a location
///
/// # Arguments
///
/// * 'mgr' - the manager struct
/// * 'location' - the location to report on
pub fn build_report(mgr: &mut Mgr, location: &Location) -> Result<AirQualityReport, ReportError> {
    build_report_at(mgr, location, Utc::now())
}

/// Builds an air quality report for a location as of the given time.
///
/// Current conditions are served from the response cache when fresh, otherwise
/// fetched from the source and cached. The provider index and the standard AQI
/// computed from the raw readings are reported side by side together with a
/// synthesized forecast.
///
/// # Arguments
///
/// * 'mgr' - the manager struct
/// * 'location' - the location to report on
/// * 'now' - the time used for cache freshness and forecast timestamps
pub fn build_report_at(mgr: &mut Mgr, location: &Location, now: DateTime<Utc>) -> Result<AirQualityReport, ReportError> {
    let key = cache_key(Endpoint::Current, location.lat, location.long, mgr.coord_precision);

    let (observation, cached) = match mgr.cache.get_at(&key, now) {
        Some(observation) => {
            debug!("cache hit: {}", key);
            (observation, true)
        }
        None => {
            debug!("cache miss: {}, fetching from {}", key, mgr.source.name());
            let observation = mgr.source.fetch_current(location.lat, location.long)
                .inspect_err(|e| warn!("fetch of current conditions for {} failed: {}", location.name, e))?;
            (mgr.cache.put_at(&key, observation, now), false)
        }
    };

    if mgr.history_mode {
        if !mgr.history.contains_key(&key) {
            seed_history(mgr, &key, location, now);
        }
        if !cached {
            record_sample(mgr, &key, &observation);
        }
    }

    let standard = aqi::standard_aqi(&observation.reading)?;

    let mut pollutants: Vec<PollutantDetail> = Vec::with_capacity(observation.reading.len());
    for (pollutant, concentration) in observation.reading.iter() {
        pollutants.push(PollutantDetail {
            pollutant,
            concentration,
            sub_index: aqi::sub_index(pollutant, concentration)?,
            status: pollutant_status(pollutant, concentration),
        });
    }

    let history = if mgr.history_mode {
        mgr.history.get(&key).map(|h| h.iter().copied().collect::<Vec<HistorySample>>())
    } else {
        None
    };
    let request = ForecastRequest {
        anchor: Some(observation.index),
        detail: mgr.detail,
        history: history.as_deref(),
    };
    let forecast = mgr.strategy.forecast(&request, now);

    Ok(AirQualityReport {
        location: location.name.clone(),
        lat: location.lat,
        long: location.long,
        observed: observation.timestamp,
        cached,
        provider_index: observation.index,
        provider_category: classify(observation.index),
        standard_index: standard.map(|(_, aqi)| AqiValue::Standard(aqi)),
        standard_category: standard.map(|(_, aqi)| classify_standard(aqi)),
        dominant_pollutant: standard.map(|(p, _)| p),
        pollutants,
        forecast,
    })
}

/// Seeds the history ring of a location from the source's history endpoint.
/// Failures are logged and leave the location with an empty history.
fn seed_history(mgr: &mut Mgr, key: &str, location: &Location, now: DateTime<Utc>) {
    let history_key = cache_key(Endpoint::History, location.lat, location.long, mgr.coord_precision);

    let observations = match mgr.history_cache.get_at(&history_key, now) {
        Some(observations) => Some(observations),
        None => match mgr.source.fetch_history(location.lat, location.long, mgr.history_len) {
            Ok(observations) => Some(mgr.history_cache.put_at(&history_key, observations, now)),
            Err(e) => {
                warn!("fetch of history for {} failed, continuing without: {}", location.name, e);
                None
            }
        },
    };

    let ring = mgr.history.entry(key.to_string()).or_insert_with(VecDeque::new);
    for observation in observations.iter().flat_map(|o| o.iter()) {
        if let Some(sample) = to_sample(observation) {
            ring.push_back(sample);
        }
    }
    while ring.len() > mgr.history_len {
        ring.pop_front();
    }
}

/// Appends an observation to the history ring of a location, dropping the oldest
/// sample once the ring is full
fn record_sample(mgr: &mut Mgr, key: &str, observation: &Arc<Observation>) {
    let Some(sample) = to_sample(observation) else {
        return;
    };

    let ring = mgr.history.entry(key.to_string()).or_default();
    if ring.back().is_some_and(|last| last.timestamp >= sample.timestamp) {
        return;
    }
    ring.push_back(sample);
    while ring.len() > mgr.history_len {
        ring.pop_front();
    }
}

fn to_sample(observation: &Observation) -> Option<HistorySample> {
    let AqiValue::Qualitative(index) = observation.index else {
        return None;
    };

    Some(HistorySample {
        timestamp: observation.timestamp,
        index,
        pm2_5: observation.reading.get(Pollutant::Pm25)?,
    })
}

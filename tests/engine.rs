use chrono::{TimeDelta, TimeZone, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use aircast::aqi::{to_aqi, to_aqi_by_id};
use aircast::cache::{cache_key, Endpoint, ResponseCache};
use aircast::category::{classify_qualitative, classify_standard, Level};
use aircast::errors::AqiError;
use aircast::forecast::{BoundedRandomWalk, ForecastRequest, ForecastStrategy};
use aircast::models::aqi_value::AqiValue;
use aircast::models::pollutant::Pollutant;

#[test]
fn pm25_boundary_continuity() {
    assert_eq!(to_aqi_by_id("pm2_5", 12.0), Ok(50));
    assert_eq!(to_aqi_by_id("pm2_5", 12.1), Ok(51));
}

#[test]
fn pm10_saturates_at_scale_maximum() {
    assert_eq!(to_aqi(Pollutant::Pm10, 604.0), Ok(500));
    assert_eq!(to_aqi(Pollutant::Pm10, 1_000_000.0), Ok(500));
}

#[test]
fn unknown_pollutant_is_signalled() {
    assert_eq!(to_aqi_by_id("pm1", 3.0), Err(AqiError::UnknownPollutant("pm1".to_string())));
}

#[test]
fn classifier_extremes() {
    assert_eq!(classify_qualitative(1).level, Level::Good);
    assert_eq!(classify_qualitative(5).level, Level::VeryPoor);
    assert_eq!(classify_standard(50).level, Level::Good);
    assert_eq!(classify_standard(51).level, Level::Moderate);
}

#[test]
fn synthesized_series_shape() {
    let now = Utc.with_ymd_and_hms(2025, 1, 15, 8, 30, 0).unwrap();

    let series = BoundedRandomWalk.forecast(&ForecastRequest::default(), now);
    assert_eq!(series.predictions.len(), 16);

    let mut rng = ChaCha8Rng::seed_from_u64(2025);
    let series = BoundedRandomWalk.synthesize_with(&mut rng, &ForecastRequest::default(), now);
    let mut previous = now;
    for point in &series.predictions {
        assert_eq!(point.timestamp - previous, TimeDelta::hours(3));
        assert!(matches!(point.aqi, AqiValue::Qualitative(1..=5)));
        previous = point.timestamp;
    }
}

#[test]
fn cache_round_trip_and_expiry() {
    let now = Utc.with_ymd_and_hms(2025, 1, 15, 8, 30, 0).unwrap();
    let cache = ResponseCache::new(TimeDelta::milliseconds(300_000));
    let key = cache_key(Endpoint::Current, 41.8781, -87.6298, 2);

    cache.put_at(&key, "reading".to_string(), now);
    assert_eq!(cache.get_at(&key, now).as_deref().map(String::as_str), Some("reading"));
    assert_eq!(cache.get_at(&key, now + TimeDelta::minutes(5)), None);
}

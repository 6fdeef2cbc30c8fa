//! Narrative insights and confidence scoring for synthesized forecasts.

use chrono::{Local, Timelike};
use crate::models::aqi_value::AqiValue;
use crate::models::forecast::ForecastPoint;
use crate::models::observation::HistorySample;

/// Slope (per sample) below which a PM2.5 trend is considered stable
const TREND_THRESHOLD: f64 = 0.1;

/// Number of most recent history samples used for the recent variance
const RECENT_WINDOW: usize = 6;

const SYNTHETIC_NOTE: &str = "Forecast is synthesized from a bounded random walk and is indicative only.";

/// Least squares slope of the values against their index, 0.0 for fewer than two values
///
/// # Arguments
///
/// * 'values' - equally spaced samples
pub fn trend_slope(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if values.len() < 2 {
        return 0.0;
    }

    let mean_x = (n - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / n;

    let (num, den) = values.iter().enumerate().fold((0.0, 0.0), |(num, den), (i, y)| {
        let dx = i as f64 - mean_x;
        (num + dx * (y - mean_y), den + dx * dx)
    });

    num / den
}

/// Population variance, None for an empty slice
pub fn variance(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;

    Some(values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n)
}

/// Returns true if the local hour is within morning or evening rush hours
pub fn is_rush_hour(hour: u32) -> bool {
    (7..=9).contains(&hour) || (17..=19).contains(&hour)
}

fn qualitative(point: &ForecastPoint) -> f64 {
    match point.aqi {
        AqiValue::Qualitative(v) => v as f64,
        AqiValue::Standard(v) => v as f64,
    }
}

/// Confidence percentage for a forecast backed by historical samples.
///
/// Starts at 50, adds 20 for at least 12 samples (else 10 for at least 6), 15 if the
/// recent history barely varies and 10 if the forecast itself is steady. The result
/// is clamped to 60..=95.
///
/// # Arguments
///
/// * 'history' - past samples, oldest first
/// * 'predictions' - the forecast points
pub fn history_confidence(history: &[HistorySample], predictions: &[ForecastPoint]) -> u8 {
    let mut confidence: u32 = 50;

    if history.len() >= 12 {
        confidence += 20;
    } else if history.len() >= 6 {
        confidence += 10;
    }

    let recent = history
        .iter()
        .rev()
        .take(RECENT_WINDOW)
        .map(|s| s.index as f64)
        .collect::<Vec<f64>>();
    if variance(&recent).is_some_and(|v| v < 0.1) {
        confidence += 15;
    }

    let forecast = predictions.iter().map(qualitative).collect::<Vec<f64>>();
    if variance(&forecast).is_some_and(|v| v < 0.2) {
        confidence += 10;
    }

    confidence.clamp(60, 95) as u8
}

/// Data quality label given the amount of history available
pub fn data_quality(history: Option<&[HistorySample]>) -> &'static str {
    match history.map(|h| h.len()) {
        Some(n) if n >= 12 => "High",
        Some(n) if n >= 6 => "Medium",
        Some(n) if n >= 1 => "Limited",
        _ => "Simulated",
    }
}

/// Builds the narrative insights for a forecast
///
/// # Arguments
///
/// * 'history' - past samples if running with historical context
/// * 'predictions' - the forecast points
pub fn generate_insights(history: Option<&[HistorySample]>, predictions: &[ForecastPoint]) -> Vec<String> {
    let mut insights = Vec::new();

    if let Some(history) = history.filter(|h| h.len() >= 2) {
        let pm25 = history.iter().map(|s| s.pm2_5).collect::<Vec<f64>>();
        insights.push(trend_insight(trend_slope(&pm25)).to_string());
    }

    if let Some(first) = predictions.first() {
        insights.push(time_of_day_insight(first.timestamp.with_timezone(&Local).hour()).to_string());
    }

    if let Some(peak) = predictions.iter().max_by_key(|p| qualitative(p) as u16) {
        let local = peak.timestamp.with_timezone(&Local);
        insights.push(format!(
            "Highest predicted index of {} expected around {}.",
            peak.aqi,
            local.format("%a %H:00")
        ));
        if qualitative(peak) >= 4.0 {
            insights.push("Sensitive groups should plan outdoor activities around the forecast peak.".to_string());
        }
    }

    insights.push(SYNTHETIC_NOTE.to_string());

    insights
}

fn trend_insight(slope: f64) -> &'static str {
    if slope > TREND_THRESHOLD {
        "PM2.5 concentrations are trending upward, expect gradually worsening air quality."
    } else if slope < -TREND_THRESHOLD {
        "PM2.5 concentrations are trending downward, air quality is expected to improve."
    } else {
        "PM2.5 concentrations have been stable over the recent period."
    }
}

fn time_of_day_insight(hour: u32) -> &'static str {
    if is_rush_hour(hour) {
        "The forecast window opens near rush hour, traffic may raise NO2 and particulate levels."
    } else if hour >= 22 || hour <= 5 {
        "The forecast window opens overnight when traffic emissions are usually lowest."
    } else {
        "The forecast window opens outside rush hours."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap()
    }

    fn history(indices: &[u8]) -> Vec<HistorySample> {
        indices
            .iter()
            .enumerate()
            .map(|(i, &index)| HistorySample {
                timestamp: fixed_now() + TimeDelta::hours(i as i64),
                index,
                pm2_5: 10.0 * index as f64,
            })
            .collect()
    }

    fn predictions(values: &[u8]) -> Vec<ForecastPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| ForecastPoint {
                timestamp: fixed_now() + TimeDelta::hours(3 * (i as i64 + 1)),
                aqi: AqiValue::Qualitative(v),
                pollutants: None,
            })
            .collect()
    }

    #[test]
    fn test_trend_slope() {
        assert_eq!(trend_slope(&[1.0, 2.0, 3.0, 4.0]), 1.0);
        assert_eq!(trend_slope(&[4.0, 4.0, 4.0]), 0.0);
        assert_eq!(trend_slope(&[6.0, 4.0, 2.0]), -2.0);
        assert_eq!(trend_slope(&[3.0]), 0.0);
        assert_eq!(trend_slope(&[]), 0.0);
    }

    #[test]
    fn test_variance() {
        assert_eq!(variance(&[]), None);
        assert_eq!(variance(&[2.0, 2.0]), Some(0.0));
        assert_eq!(variance(&[1.0, 3.0]), Some(1.0));
    }

    #[test]
    fn test_history_confidence() {
        let steady = predictions(&[3; 16]);
        let jumpy = predictions(&[1, 5, 1, 5, 1, 5, 1, 5, 1, 5, 1, 5, 1, 5, 1, 5]);

        // 50 + 20 + 15 + 10
        assert_eq!(history_confidence(&history(&[2; 12]), &steady), 95);
        // 50 + 20 + 15
        assert_eq!(history_confidence(&history(&[2; 12]), &jumpy), 85);
        // 50 + 10, neither history nor forecast steady
        assert_eq!(history_confidence(&history(&[1, 5, 1, 5, 1, 5]), &jumpy), 60);
        // 50 + 15 + 10, too few samples for a volume bonus
        assert_eq!(history_confidence(&history(&[3, 3, 3]), &steady), 75);
        // floor of 60
        assert_eq!(history_confidence(&[], &jumpy), 60);
    }

    #[test]
    fn test_data_quality() {
        assert_eq!(data_quality(None), "Simulated");
        assert_eq!(data_quality(Some(&[][..])), "Simulated");
        assert_eq!(data_quality(Some(history(&[2; 3]).as_slice())), "Limited");
        assert_eq!(data_quality(Some(history(&[2; 6]).as_slice())), "Medium");
        assert_eq!(data_quality(Some(history(&[2; 12]).as_slice())), "High");
    }

    #[test]
    fn test_rush_hours() {
        assert!(is_rush_hour(7));
        assert!(is_rush_hour(9));
        assert!(is_rush_hour(18));
        assert!(!is_rush_hour(12));
        assert!(!is_rush_hour(20));
    }

    #[test]
    fn test_generate_insights() {
        let rising = history(&[1, 2, 3, 4]);
        let insights = generate_insights(Some(rising.as_slice()), &predictions(&[2, 4, 3]));
        assert!(insights[0].contains("trending upward"));
        assert!(insights.iter().any(|i| i.starts_with("Highest predicted index of 4/5")));
        assert!(insights.iter().any(|i| i.contains("Sensitive groups")));
        assert_eq!(insights.last().map(String::as_str), Some(SYNTHETIC_NOTE));

        let fallback = generate_insights(None, &predictions(&[2, 2]));
        assert!(!fallback.iter().any(|i| i.contains("PM2.5")));
        assert!(!fallback.iter().any(|i| i.contains("Sensitive groups")));
        assert_eq!(fallback.len(), 3);
    }
}

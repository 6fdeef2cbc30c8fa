use std::thread;
use std::time::Duration;
use anyhow::Result;
use log::{debug, error, info};
use crate::config::Config;
use crate::initialization::Mgr;
use crate::models::report::AirQualityReport;
use crate::report::build_report;

/// Runs report rounds over all configured locations until `max_rounds` is reached,
/// or forever if no limit is configured. A failing location is logged and skipped.
///
/// # Arguments
///
/// * 'config' - the loaded configuration
/// * 'mgr' - the manager struct
pub fn run(config: &Config, mgr: &mut Mgr) -> Result<()> {
    let mut round: u32 = 0;

    loop {
        round += 1;

        for location in &config.locations {
            match build_report(mgr, location) {
                Ok(report) => {
                    info!("{}", summary(&report));
                    if config.general.print_json {
                        println!("{}", serde_json::to_string_pretty(&report)?);
                    }
                }
                Err(e) => error!("report for {} failed: {}", location.name, e),
            }
        }

        debug!("round {} done, {} cached observation(s)", round, mgr.cache.len());

        if config.worker.max_rounds.is_some_and(|max| round >= max) {
            info!("done after {} round(s)", round);
            return Ok(());
        }

        thread::sleep(Duration::from_secs(config.worker.interval_secs));
    }
}

/// One line summary of a report for the log
fn summary(report: &AirQualityReport) -> String {
    let standard = match (report.standard_index, report.standard_category, report.dominant_pollutant) {
        (Some(index), Some(category), Some(pollutant)) => format!("AQI {} ({}, {})", index, category.level, pollutant),
        _ => "AQI n/a".to_string(),
    };

    format!(
        "{}: index {} ({}), {}, {}forecast by {} at {}% confidence",
        report.location,
        report.provider_index,
        report.provider_category.level,
        standard,
        if report.cached { "cached, " } else { "" },
        report.forecast.method,
        report.forecast.confidence,
    )
}

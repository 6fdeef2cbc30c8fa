use crate::breakpoints;
use crate::errors::AqiError;
use crate::models::aqi_value::AqiValue;
use crate::models::pollutant::{Pollutant, PollutantReading};

/// Calculates the standard (0-500) AQI for a pollutant concentration.
///
/// The concentration is first truncated to the granularity of the pollutant's
/// breakpoint table, after which the tier containing it is located and the AQI
/// is interpolated linearly within that tier:
///
/// AQI = (AQIhigh - AQIlow) / (Chigh - Clow) * (C - Clow) + AQIlow
///
/// Concentrations above the last tier saturate at 500.
///
/// # Arguments
///
/// * 'pollutant' - the pollutant the concentration belongs to
/// * 'concentration' - concentration in breakpoint table units (see `Pollutant::breakpoint_unit`)
///
/// # Examples
///
/// ```ignore
/// assert_eq!(to_aqi(Pollutant::Pm25, 12.0), Ok(50));
/// assert_eq!(to_aqi(Pollutant::Pm25, 12.1), Ok(51));
/// assert_eq!(to_aqi(Pollutant::Pm10, 1_000_000.0), Ok(500));
/// ```
pub fn to_aqi(pollutant: Pollutant, concentration: f64) -> Result<u16, AqiError> {
    if !concentration.is_finite() || concentration < 0.0 {
        return Err(AqiError::InvalidConcentration { pollutant: pollutant.id().to_string(), value: concentration });
    }

    let table = breakpoints::table(pollutant);
    let units = table.truncate_units(concentration);
    let truncated = units as f64 / table.scale();

    for tier in table.tiers {
        let (low, high) = table.tier_units(tier);
        if units >= low && units <= high {
            let aqi = (tier.aqi_high - tier.aqi_low) as f64 / (tier.conc_high - tier.conc_low)
                * (truncated - tier.conc_low)
                + tier.aqi_low as f64;
            return Ok(aqi.round() as u16);
        }
    }

    Ok(AqiValue::STANDARD_MAX)
}

/// Same as `to_aqi` but with the pollutant given by its provider identifier,
/// e.g. "pm2_5" or "o3"
///
/// # Arguments
///
/// * 'pollutant_id' - pollutant identifier
/// * 'concentration' - concentration in breakpoint table units
pub fn to_aqi_by_id(pollutant_id: &str, concentration: f64) -> Result<u16, AqiError> {
    to_aqi(pollutant_id.parse()?, concentration)
}

/// Calculates the standard AQI sub-index for a reading concentration
///
/// # Arguments
///
/// * 'pollutant' - the pollutant
/// * 'value' - concentration in the reading unit (µg/m³, mg/m³ for CO)
pub fn sub_index(pollutant: Pollutant, value: f64) -> Result<u16, AqiError> {
    to_aqi(pollutant, pollutant.to_breakpoint_units(value))
}

/// Calculates the overall standard AQI for a reading, which is the highest
/// sub-index among its pollutants. Returns the dominant pollutant together with
/// its AQI, or None if the reading is empty.
///
/// # Arguments
///
/// * 'reading' - pollutant concentrations in their reading units (µg/m³, mg/m³ for CO)
pub fn standard_aqi(reading: &PollutantReading) -> Result<Option<(Pollutant, u16)>, AqiError> {
    if reading.is_empty() {
        return Ok(None);
    }

    let mut dominant: Option<(Pollutant, u16)> = None;
    for (pollutant, value) in reading.iter() {
        let aqi = sub_index(pollutant, value)?;
        if dominant.is_none_or(|(_, max)| aqi > max) {
            dominant = Some((pollutant, aqi));
        }
    }

    Ok(dominant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Pollutant::Pm25, 0.0, 0)]
    #[case(Pollutant::Pm25, 6.0, 25)]
    #[case(Pollutant::Pm25, 12.0, 50)]
    #[case(Pollutant::Pm25, 12.1, 51)]
    #[case(Pollutant::Pm25, 12.09, 50)]
    #[case(Pollutant::Pm25, 35.0, 99)]
    #[case(Pollutant::Pm25, 35.5, 101)]
    #[case(Pollutant::Pm25, 55.5, 151)]
    #[case(Pollutant::Pm25, 150.5, 201)]
    #[case(Pollutant::Pm25, 250.5, 301)]
    #[case(Pollutant::Pm25, 500.4, 500)]
    #[case(Pollutant::Pm10, 54.9, 50)]
    #[case(Pollutant::Pm10, 55.0, 51)]
    #[case(Pollutant::Pm10, 100.0, 73)]
    #[case(Pollutant::Pm10, 604.0, 500)]
    #[case(Pollutant::O3, 0.0545, 50)]
    #[case(Pollutant::O3, 0.055, 51)]
    #[case(Pollutant::O3, 0.2009, 300)]
    #[case(Pollutant::Co, 4.45, 50)]
    #[case(Pollutant::Co, 4.5, 51)]
    #[case(Pollutant::Co, 4.49999999995, 50)]
    #[case(Pollutant::Pm25, 12.09999999999, 50)]
    #[case(Pollutant::So2, 35.9, 50)]
    #[case(Pollutant::So2, 36.0, 51)]
    #[case(Pollutant::No2, 100.0, 100)]
    #[case(Pollutant::No2, 101.0, 101)]
    fn test_to_aqi(#[case] pollutant: Pollutant, #[case] concentration: f64, #[case] expected: u16) {
        assert_eq!(to_aqi(pollutant, concentration), Ok(expected), "{} at {}", pollutant, concentration);
    }

    #[rstest]
    #[case(Pollutant::Pm25, 500.5)]
    #[case(Pollutant::Pm10, 605.0)]
    #[case(Pollutant::Pm10, 1_000_000.0)]
    #[case(Pollutant::O3, 0.201)]
    #[case(Pollutant::Co, 99.0)]
    #[case(Pollutant::No2, 5000.0)]
    fn test_saturation(#[case] pollutant: Pollutant, #[case] concentration: f64) {
        assert_eq!(to_aqi(pollutant, concentration), Ok(500));
    }

    #[test]
    fn test_tier_boundaries_map_to_aqi_low() {
        for p in Pollutant::ALL {
            for tier in breakpoints::table(p).tiers {
                assert_eq!(to_aqi(p, tier.conc_low), Ok(tier.aqi_low), "{} at {}", p, tier.conc_low);
                assert_eq!(to_aqi(p, tier.conc_high), Ok(tier.aqi_high), "{} at {}", p, tier.conc_high);
            }
        }
    }

    #[test]
    fn test_monotonic_in_concentration() {
        for p in Pollutant::ALL {
            let table = breakpoints::table(p);
            let top = table.tiers.last().map(|t| t.conc_high).unwrap() * 1.2;
            let step = 1.0 / table.scale() / 2.0;
            let mut last = 0;
            let mut c = 0.0;
            while c <= top {
                let aqi = to_aqi(p, c).unwrap();
                assert!(aqi >= last, "{}: aqi dropped from {} to {} at {}", p, last, aqi, c);
                last = aqi;
                c += step;
            }
        }
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(
            to_aqi(Pollutant::Pm25, -0.1),
            Err(AqiError::InvalidConcentration { pollutant: "pm2_5".to_string(), value: -0.1 })
        );
        assert!(to_aqi(Pollutant::Co, f64::NAN).is_err());
        assert!(to_aqi(Pollutant::Co, f64::INFINITY).is_err());
    }

    #[test]
    fn test_to_aqi_by_id() {
        assert_eq!(to_aqi_by_id("pm2_5", 12.0), Ok(50));
        assert_eq!(to_aqi_by_id("pm10", 604.0), Ok(500));
        assert_eq!(to_aqi_by_id("nh3", 10.0), Err(AqiError::UnknownPollutant("nh3".to_string())));
    }

    #[rstest]
    #[case(Pollutant::Pm25, 40.0, 112)]
    #[case(Pollutant::Co, 0.5, 5)]
    #[case(Pollutant::Co, 3.5, 34)]
    #[case(Pollutant::Co, 11.5, 109)]
    #[case(Pollutant::No2, 188.18, 100)]
    fn test_sub_index(#[case] pollutant: Pollutant, #[case] value: f64, #[case] expected: u16) {
        assert_eq!(sub_index(pollutant, value), Ok(expected), "{} at {}", pollutant, value);
    }

    #[test]
    fn test_co_can_dominate() {
        let reading = PollutantReading::new([(Pollutant::Pm25, 5.0), (Pollutant::Co, 11.5)]).unwrap();
        assert_eq!(standard_aqi(&reading), Ok(Some((Pollutant::Co, 109))));
    }

    #[test]
    fn test_standard_aqi_picks_dominant_pollutant() {
        let reading = PollutantReading::new([
            (Pollutant::Pm25, 40.0),
            (Pollutant::Pm10, 60.0),
            (Pollutant::No2, 20.0),
        ]).unwrap();

        // PM2.5 at 40.0 is 112, PM10 at 60 is 53
        assert_eq!(standard_aqi(&reading), Ok(Some((Pollutant::Pm25, 112))));
        assert_eq!(standard_aqi(&PollutantReading::default()), Ok(None));
    }
}

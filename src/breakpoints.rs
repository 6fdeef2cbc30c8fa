//! EPA breakpoint tables for the 0-500 AQI scale.
//!
//! Concentrations are in the units of the EPA technical assistance document:
//! PM2.5 and PM10 in µg/m³ (24-hour), O3 in ppm (8-hour), CO in ppm (8-hour),
//! SO2 and NO2 in ppb (1-hour). Every table is ordered, gap-free and
//! non-overlapping at the truncation granularity of its pollutant.

use crate::models::pollutant::Pollutant;

/// One linear segment of a breakpoint table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    pub aqi_low: u16,
    pub aqi_high: u16,
    pub conc_low: f64,
    pub conc_high: f64,
}

const fn tier(conc_low: f64, conc_high: f64, aqi_low: u16, aqi_high: u16) -> Tier {
    Tier { aqi_low, aqi_high, conc_low, conc_high }
}

/// Breakpoint table for a single pollutant
#[derive(Debug)]
pub struct PollutantTable {
    pub pollutant: Pollutant,
    /// Number of decimals kept when truncating a raw concentration
    pub decimals: u32,
    pub tiers: &'static [Tier],
}

const PM25_TIERS: [Tier; 6] = [
    tier(0.0, 12.0, 0, 50),       // Good
    tier(12.1, 35.4, 51, 100),    // Moderate
    tier(35.5, 55.4, 101, 150),   // Unhealthy for Sensitive Groups
    tier(55.5, 150.4, 151, 200),  // Unhealthy
    tier(150.5, 250.4, 201, 300), // Very Unhealthy
    tier(250.5, 500.4, 301, 500), // Hazardous
];

const PM10_TIERS: [Tier; 6] = [
    tier(0.0, 54.0, 0, 50),
    tier(55.0, 154.0, 51, 100),
    tier(155.0, 254.0, 101, 150),
    tier(255.0, 354.0, 151, 200),
    tier(355.0, 424.0, 201, 300),
    tier(425.0, 604.0, 301, 500),
];

// 8-hour ozone has no Hazardous band
const O3_TIERS: [Tier; 5] = [
    tier(0.000, 0.054, 0, 50),
    tier(0.055, 0.070, 51, 100),
    tier(0.071, 0.085, 101, 150),
    tier(0.086, 0.105, 151, 200),
    tier(0.106, 0.200, 201, 300),
];

const CO_TIERS: [Tier; 6] = [
    tier(0.0, 4.4, 0, 50),
    tier(4.5, 9.4, 51, 100),
    tier(9.5, 12.4, 101, 150),
    tier(12.5, 15.4, 151, 200),
    tier(15.5, 30.4, 201, 300),
    tier(30.5, 50.4, 301, 500),
];

const SO2_TIERS: [Tier; 6] = [
    tier(0.0, 35.0, 0, 50),
    tier(36.0, 75.0, 51, 100),
    tier(76.0, 185.0, 101, 150),
    tier(186.0, 304.0, 151, 200),
    tier(305.0, 604.0, 201, 300),
    tier(605.0, 1004.0, 301, 500),
];

const NO2_TIERS: [Tier; 6] = [
    tier(0.0, 53.0, 0, 50),
    tier(54.0, 100.0, 51, 100),
    tier(101.0, 360.0, 101, 150),
    tier(361.0, 649.0, 151, 200),
    tier(650.0, 1249.0, 201, 300),
    tier(1250.0, 2049.0, 301, 500),
];

static TABLES: [PollutantTable; 6] = [
    PollutantTable { pollutant: Pollutant::Pm25, decimals: 1, tiers: &PM25_TIERS },
    PollutantTable { pollutant: Pollutant::Pm10, decimals: 0, tiers: &PM10_TIERS },
    PollutantTable { pollutant: Pollutant::O3, decimals: 3, tiers: &O3_TIERS },
    PollutantTable { pollutant: Pollutant::Co, decimals: 1, tiers: &CO_TIERS },
    PollutantTable { pollutant: Pollutant::So2, decimals: 0, tiers: &SO2_TIERS },
    PollutantTable { pollutant: Pollutant::No2, decimals: 0, tiers: &NO2_TIERS },
];

/// Relative slack, in units of machine epsilon, added before flooring so that values
/// such as 12.1 (scaled to 120.99999999999999) land on their intended unit
const TRUNCATION_ULPS: f64 = 4.0;

/// Returns the breakpoint table for the given pollutant
///
/// # Arguments
///
/// * 'pollutant' - the pollutant to look up
pub fn table(pollutant: Pollutant) -> &'static PollutantTable {
    match pollutant {
        Pollutant::Pm25 => &TABLES[0],
        Pollutant::Pm10 => &TABLES[1],
        Pollutant::O3 => &TABLES[2],
        Pollutant::Co => &TABLES[3],
        Pollutant::So2 => &TABLES[4],
        Pollutant::No2 => &TABLES[5],
    }
}

impl PollutantTable {
    /// Scale factor between a concentration and its integer truncation units
    pub fn scale(&self) -> f64 {
        10f64.powi(self.decimals as i32)
    }

    /// Truncates a concentration toward zero at the table granularity and returns
    /// the result as a whole number of granularity units
    ///
    /// # Arguments
    ///
    /// * 'concentration' - non-negative concentration in table units
    pub fn truncate_units(&self, concentration: f64) -> i64 {
        let scaled = concentration * self.scale();
        (scaled + scaled.abs() * TRUNCATION_ULPS * f64::EPSILON).floor() as i64
    }

    /// Lower and upper bound of a tier expressed in granularity units
    pub fn tier_units(&self, tier: &Tier) -> (i64, i64) {
        let scale = self.scale();
        ((tier.conc_low * scale).round() as i64, (tier.conc_high * scale).round() as i64)
    }

    /// Checks that tiers are ascending and contiguous in both domains
    pub fn validate(&self) -> Result<(), String> {
        if self.tiers.is_empty() {
            return Err(format!("{}: empty breakpoint table", self.pollutant));
        }
        if self.tiers[0].conc_low != 0.0 || self.tiers[0].aqi_low != 0 {
            return Err(format!("{}: table does not start at zero", self.pollutant));
        }

        for t in self.tiers {
            let (low, high) = self.tier_units(t);
            if low > high || t.aqi_low >= t.aqi_high {
                return Err(format!("{}: tier {:?} is not increasing", self.pollutant, t));
            }
        }

        for pair in self.tiers.windows(2) {
            let (_, high) = self.tier_units(&pair[0]);
            let (next_low, _) = self.tier_units(&pair[1]);
            if next_low != high + 1 {
                return Err(format!("{}: gap or overlap after {:?}", self.pollutant, pair[0]));
            }
            if pair[1].aqi_low != pair[0].aqi_high + 1 {
                return Err(format!("{}: aqi bands not contiguous after {:?}", self.pollutant, pair[0]));
            }
        }

        Ok(())
    }
}

/// Validates all breakpoint tables, used once at startup
pub fn validate_tables() -> Result<(), String> {
    for t in TABLES.iter() {
        t.validate()?;
    }

    Ok(())
}

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::errors::AqiError;

/// Molar volume in litres of an ideal gas at 25 °C and 1 atm
const MOLAR_VOLUME: f64 = 24.45;

/// Pollutants known to the breakpoint table
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pollutant {
    #[serde(rename = "pm2_5")]
    Pm25,
    #[serde(rename = "pm10")]
    Pm10,
    #[serde(rename = "no2")]
    No2,
    #[serde(rename = "o3")]
    O3,
    #[serde(rename = "co")]
    Co,
    #[serde(rename = "so2")]
    So2,
}

impl Pollutant {
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::No2,
        Pollutant::O3,
        Pollutant::Co,
        Pollutant::So2,
    ];

    /// Returns the identifier used by the upstream provider
    pub fn id(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => "pm2_5",
            Pollutant::Pm10 => "pm10",
            Pollutant::No2 => "no2",
            Pollutant::O3 => "o3",
            Pollutant::Co => "co",
            Pollutant::So2 => "so2",
        }
    }

    /// Unit used by the EPA breakpoint table for this pollutant
    pub fn breakpoint_unit(&self) -> &'static str {
        match self {
            Pollutant::Pm25 | Pollutant::Pm10 => "µg/m³",
            Pollutant::O3 | Pollutant::Co => "ppm",
            Pollutant::No2 | Pollutant::So2 => "ppb",
        }
    }

    /// Unit a `PollutantReading` holds this pollutant in
    pub fn reading_unit(&self) -> &'static str {
        match self {
            Pollutant::Co => "mg/m³",
            _ => "µg/m³",
        }
    }

    /// Molecular weight in g/mol, None for particulates
    fn molecular_weight(&self) -> Option<f64> {
        match self {
            Pollutant::Pm25 | Pollutant::Pm10 => None,
            Pollutant::No2 => Some(46.01),
            Pollutant::O3 => Some(48.00),
            Pollutant::Co => Some(28.01),
            Pollutant::So2 => Some(64.07),
        }
    }

    /// Converts a reading concentration (see `reading_unit`) into the unit of the
    /// breakpoint table.
    ///
    /// Particulates are passed through as-is, gases are converted to ppb (NO2, SO2)
    /// or ppm (O3, CO) at 25 °C and 1 atm. CO is read in mg/m³, which maps straight
    /// to ppm.
    ///
    /// # Arguments
    ///
    /// * 'value' - concentration in the reading unit
    pub fn to_breakpoint_units(&self, value: f64) -> f64 {
        match (self, self.molecular_weight()) {
            (_, None) => value,
            (Pollutant::Co, Some(mw)) => value * MOLAR_VOLUME / mw,
            (Pollutant::O3, Some(mw)) => value * MOLAR_VOLUME / mw / 1000.0,
            (_, Some(mw)) => value * MOLAR_VOLUME / mw,
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Pollutant {
    type Err = AqiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pollutant::ALL
            .iter()
            .find(|p| p.id() == s)
            .copied()
            .ok_or_else(|| AqiError::UnknownPollutant(s.to_string()))
    }
}

/// A set of pollutant concentrations, µg/m³ except CO in mg/m³. Immutable once built.
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct PollutantReading(BTreeMap<Pollutant, f64>);

impl PollutantReading {
    /// Builds a reading from pollutant/concentration pairs.
    ///
    /// Negative or non-finite concentrations are rejected.
    ///
    /// # Arguments
    ///
    /// * 'values' - pairs of pollutant and concentration in its reading unit
    pub fn new<I>(values: I) -> Result<Self, AqiError>
    where
        I: IntoIterator<Item = (Pollutant, f64)>,
    {
        let mut map = BTreeMap::new();
        for (pollutant, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(AqiError::InvalidConcentration { pollutant: pollutant.id().to_string(), value });
            }
            map.insert(pollutant, value);
        }

        Ok(PollutantReading(map))
    }

    pub fn get(&self, pollutant: Pollutant) -> Option<f64> {
        self.0.get(&pollutant).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pollutant, f64)> + '_ {
        self.0.iter().map(|(p, v)| (*p, *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

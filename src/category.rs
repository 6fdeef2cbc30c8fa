use std::fmt;
use serde::Serialize;
use crate::models::aqi_value::AqiValue;
use crate::models::pollutant::Pollutant;

/// Qualitative air quality levels for both scales. The qualitative (1-5) scale uses
/// Good, Fair, Moderate, Poor and VeryPoor, the standard (0-500) scale uses Good,
/// Moderate, UnhealthySensitive, Unhealthy, VeryUnhealthy and Hazardous.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Good,
    Fair,
    Moderate,
    UnhealthySensitive,
    Poor,
    Unhealthy,
    VeryPoor,
    VeryUnhealthy,
    Hazardous,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Level::Good => write!(f, "Good"),
            Level::Fair => write!(f, "Fair"),
            Level::Moderate => write!(f, "Moderate"),
            Level::UnhealthySensitive => write!(f, "Unhealthy for Sensitive Groups"),
            Level::Poor => write!(f, "Poor"),
            Level::Unhealthy => write!(f, "Unhealthy"),
            Level::VeryPoor => write!(f, "Very Poor"),
            Level::VeryUnhealthy => write!(f, "Very Unhealthy"),
            Level::Hazardous => write!(f, "Hazardous"),
        }
    }
}

/// Presentation of an AQI value, always derived from the value itself
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub level: Level,
    pub color: &'static str,
    pub advisory: &'static str,
}

const QUALITATIVE: [Category; 5] = [
    Category {
        level: Level::Good,
        color: "#00e400",
        advisory: "Air quality is satisfactory and poses little or no risk.",
    },
    Category {
        level: Level::Fair,
        color: "#ffff00",
        advisory: "Air quality is acceptable. Unusually sensitive people should consider limiting prolonged outdoor exertion.",
    },
    Category {
        level: Level::Moderate,
        color: "#ff8c00",
        advisory: "Sensitive groups may experience health effects and should reduce prolonged outdoor exertion.",
    },
    Category {
        level: Level::Poor,
        color: "#ff0000",
        advisory: "Everyone may begin to experience health effects. Limit time spent outdoors.",
    },
    Category {
        level: Level::VeryPoor,
        color: "#8f3f97",
        advisory: "Health warnings of emergency conditions. Avoid outdoor activity.",
    },
];

const STANDARD: [Category; 6] = [
    Category {
        level: Level::Good,
        color: "#28a745",
        advisory: "Air quality is satisfactory and poses little or no risk.",
    },
    Category {
        level: Level::Moderate,
        color: "#ffc107",
        advisory: "Air quality is acceptable. Unusually sensitive people should consider limiting prolonged outdoor exertion.",
    },
    Category {
        level: Level::UnhealthySensitive,
        color: "#fd7e14",
        advisory: "Members of sensitive groups may experience health effects. The general public is less likely to be affected.",
    },
    Category {
        level: Level::Unhealthy,
        color: "#dc3545",
        advisory: "Some members of the general public may experience health effects, sensitive groups more seriously.",
    },
    Category {
        level: Level::VeryUnhealthy,
        color: "#6f42c1",
        advisory: "Health alert: the risk of health effects is increased for everyone.",
    },
    Category {
        level: Level::Hazardous,
        color: "#8b0000",
        advisory: "Health warning of emergency conditions: everyone is more likely to be affected.",
    },
];

/// Classifies a provider-native index on the 1-5 scale
///
/// # Arguments
///
/// * 'aqi' - the qualitative index
pub fn classify_qualitative(aqi: u8) -> Category {
    match aqi {
        0..=1 => QUALITATIVE[0],
        2 => QUALITATIVE[1],
        3 => QUALITATIVE[2],
        4 => QUALITATIVE[3],
        _ => QUALITATIVE[4],
    }
}

/// Classifies an EPA AQI on the 0-500 scale
///
/// # Arguments
///
/// * 'aqi' - the standard AQI
pub fn classify_standard(aqi: u16) -> Category {
    match aqi {
        0..=50 => STANDARD[0],
        51..=100 => STANDARD[1],
        101..=150 => STANDARD[2],
        151..=200 => STANDARD[3],
        201..=300 => STANDARD[4],
        _ => STANDARD[5],
    }
}

/// Classifies a value using the classifier matching its scale
pub fn classify(value: AqiValue) -> Category {
    match value {
        AqiValue::Qualitative(v) => classify_qualitative(v),
        AqiValue::Standard(v) => classify_standard(v),
    }
}

/// Health status of an individual pollutant
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollutantStatus {
    Good,
    Moderate,
    Unhealthy,
}

/// Returns the health status of a single pollutant from its raw concentration in µg/m³.
/// Only particulates, NO2 and O3 have status thresholds, other pollutants return None.
///
/// # Arguments
///
/// * 'pollutant' - the pollutant
/// * 'ug_m3' - concentration in µg/m³
pub fn pollutant_status(pollutant: Pollutant, ug_m3: f64) -> Option<PollutantStatus> {
    let (unhealthy, moderate) = match pollutant {
        Pollutant::Pm25 => (35.0, 15.0),
        Pollutant::Pm10 => (50.0, 25.0),
        Pollutant::No2 => (200.0, 100.0),
        Pollutant::O3 => (100.0, 50.0),
        Pollutant::Co | Pollutant::So2 => return None,
    };

    if ug_m3 > unhealthy {
        Some(PollutantStatus::Unhealthy)
    } else if ug_m3 > moderate {
        Some(PollutantStatus::Moderate)
    } else {
        Some(PollutantStatus::Good)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, Level::Good, "#00e400")]
    #[case(2, Level::Fair, "#ffff00")]
    #[case(3, Level::Moderate, "#ff8c00")]
    #[case(4, Level::Poor, "#ff0000")]
    #[case(5, Level::VeryPoor, "#8f3f97")]
    #[case(9, Level::VeryPoor, "#8f3f97")]
    fn test_classify_qualitative(#[case] aqi: u8, #[case] level: Level, #[case] color: &str) {
        let category = classify_qualitative(aqi);
        assert_eq!(category.level, level);
        assert_eq!(category.color, color);
    }

    #[rstest]
    #[case(0, Level::Good, "#28a745")]
    #[case(50, Level::Good, "#28a745")]
    #[case(51, Level::Moderate, "#ffc107")]
    #[case(100, Level::Moderate, "#ffc107")]
    #[case(101, Level::UnhealthySensitive, "#fd7e14")]
    #[case(150, Level::UnhealthySensitive, "#fd7e14")]
    #[case(151, Level::Unhealthy, "#dc3545")]
    #[case(200, Level::Unhealthy, "#dc3545")]
    #[case(201, Level::VeryUnhealthy, "#6f42c1")]
    #[case(300, Level::VeryUnhealthy, "#6f42c1")]
    #[case(301, Level::Hazardous, "#8b0000")]
    #[case(500, Level::Hazardous, "#8b0000")]
    fn test_classify_standard(#[case] aqi: u16, #[case] level: Level, #[case] color: &str) {
        let category = classify_standard(aqi);
        assert_eq!(category.level, level);
        assert_eq!(category.color, color);
    }

    #[test]
    fn test_classify_dispatches_on_scale() {
        // The same number means different things on the two scales
        assert_eq!(classify(AqiValue::Qualitative(3)).level, Level::Moderate);
        assert_eq!(classify(AqiValue::Standard(3)).level, Level::Good);
        assert_eq!(classify(AqiValue::Qualitative(5)), classify_qualitative(5));
    }

    #[rstest]
    #[case(Pollutant::Pm25, 15.0, Some(PollutantStatus::Good))]
    #[case(Pollutant::Pm25, 15.1, Some(PollutantStatus::Moderate))]
    #[case(Pollutant::Pm25, 35.1, Some(PollutantStatus::Unhealthy))]
    #[case(Pollutant::Pm10, 25.0, Some(PollutantStatus::Good))]
    #[case(Pollutant::Pm10, 50.0, Some(PollutantStatus::Moderate))]
    #[case(Pollutant::Pm10, 51.0, Some(PollutantStatus::Unhealthy))]
    #[case(Pollutant::No2, 101.0, Some(PollutantStatus::Moderate))]
    #[case(Pollutant::No2, 201.0, Some(PollutantStatus::Unhealthy))]
    #[case(Pollutant::O3, 50.0, Some(PollutantStatus::Good))]
    #[case(Pollutant::O3, 100.5, Some(PollutantStatus::Unhealthy))]
    #[case(Pollutant::Co, 5000.0, None)]
    #[case(Pollutant::So2, 5.0, None)]
    fn test_pollutant_status(#[case] pollutant: Pollutant, #[case] value: f64, #[case] expected: Option<PollutantStatus>) {
        assert_eq!(pollutant_status(pollutant, value), expected);
    }
}

use std::fmt;
use serde::Serialize;

/// An air quality index value on one of the two supported scales.
///
/// The provider-native qualitative scale (1-5) and the EPA standard scale (0-500)
/// are never compared or merged, they are only presented side by side.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "scale", content = "value", rename_all = "snake_case")]
pub enum AqiValue {
    Qualitative(u8),
    Standard(u16),
}

impl AqiValue {
    /// Highest value on the qualitative scale
    pub const QUALITATIVE_MAX: u8 = 5;

    /// Highest value on the standard scale
    pub const STANDARD_MAX: u16 = 500;
}

impl fmt::Display for AqiValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AqiValue::Qualitative(v) => write!(f, "{}/5", v),
            AqiValue::Standard(v) => write!(f, "{}", v),
        }
    }
}

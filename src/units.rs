use serde::{Deserialize, Serialize};
use std::fmt;

/// Display unit for temperatures. All upstream values are Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
pub enum TemperatureUnit {
    #[default]
    #[serde(rename = "C")]
    #[value(name = "C", alias = "c")]
    Celsius,
    #[serde(rename = "F")]
    #[value(name = "F", alias = "f")]
    Fahrenheit,
    #[serde(rename = "K")]
    #[value(name = "K", alias = "k")]
    Kelvin,
}

impl TemperatureUnit {
    /// Parse a unit code; anything unrecognized falls back to Celsius.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "F" | "f" => TemperatureUnit::Fahrenheit,
            "K" | "k" => TemperatureUnit::Kelvin,
            _ => TemperatureUnit::Celsius,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
            TemperatureUnit::Kelvin => "K",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::Kelvin => "K",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Convert a Celsius value to `unit`, rounded half away from zero.
pub fn convert(value_celsius: f64, unit: TemperatureUnit) -> i64 {
    let converted = match unit {
        TemperatureUnit::Fahrenheit => value_celsius * 9.0 / 5.0 + 32.0,
        TemperatureUnit::Kelvin => value_celsius + 273.15,
        TemperatureUnit::Celsius => value_celsius,
    };
    converted.round() as i64
}

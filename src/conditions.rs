//! Labels and glyphs for provider condition codes ("Clear", "Rain", ...).
//!
//! `describe` and `emoji` are independent tables. The fog group in `emoji`
//! is narrower than the one in `describe`; keep them separate.

pub const NO_DATA_LABEL: &str = "No data";
pub const THERMOMETER_GLYPH: &str = "🌡️";

/// Human-readable label for a condition code.
///
/// Unknown non-empty codes are returned verbatim.
pub fn describe(code: Option<&str>) -> &str {
    let code = match code {
        Some(code) if !code.is_empty() => code,
        _ => return NO_DATA_LABEL,
    };

    match code {
        "Clear" => "Sunny",
        "Clouds" => "Cloudy",
        "Rain" => "Rain",
        "Snow" => "Snow",
        "Thunderstorm" => "Thunderstorm",
        "Drizzle" => "Drizzle",
        "Mist" | "Fog" | "Haze" | "Smoke" | "Dust" | "Sand" | "Ash" | "Squall" | "Tornado" => {
            "Foggy"
        }
        other => other,
    }
}

/// Emoji glyph for a condition code.
pub fn emoji(code: Option<&str>) -> &'static str {
    match code {
        Some("Clear") => "☀️",
        Some("Clouds") => "☁️",
        Some("Rain") => "🌧️",
        Some("Snow") => "❄️",
        Some("Thunderstorm") => "⛈️",
        Some("Drizzle") => "🌦️",
        Some("Mist" | "Fog" | "Haze") => "🌫️",
        _ => THERMOMETER_GLYPH,
    }
}

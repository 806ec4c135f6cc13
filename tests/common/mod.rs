#![allow(dead_code)]

use serde_json::{json, Value};
use std::time::Duration;
use weather_dashboard::api::WeatherProvider;

/// 2024-01-15 00:00:00 UTC
pub const JAN_15: i64 = 1_705_276_800;
pub const HOUR: i64 = 3_600;

pub fn provider_for(server_uri: &str) -> WeatherProvider {
    WeatherProvider::new(server_uri, "test-key", Duration::from_secs(5))
        .expect("Failed to create provider")
}

pub fn current_body(temp: f64, condition: &str) -> Value {
    json!({
        "main": {"temp": temp, "humidity": 40, "pressure": 1013},
        "weather": [{"id": 800, "main": condition, "description": "", "icon": "01d"}],
        "wind": {"speed": 5.0, "deg": 200},
        "clouds": {"all": 20},
        "name": "Test"
    })
}

/// Eight three-hour samples: two on Jan 15 (Rain then Clear), six on Jan 16.
pub fn two_day_forecast_body() -> Value {
    let mut list = vec![
        json!({
            "dt": JAN_15 + 18 * HOUR,
            "main": {"temp_min": 1.0, "temp_max": 2.5},
            "weather": [{"main": "Rain", "icon": "10n"}],
            "pop": 0.6,
            "rain": {"3h": 1.2}
        }),
        json!({
            "dt": JAN_15 + 21 * HOUR,
            "main": {"temp_min": -0.5, "temp_max": 1.5},
            "weather": [{"main": "Clear", "icon": "01n"}],
            "pop": 0.1
        }),
    ];

    for i in 0..6 {
        list.push(json!({
            "dt": JAN_15 + 24 * HOUR + i * 3 * HOUR,
            "main": {"temp_min": 0.0 + i as f64, "temp_max": 2.0 + i as f64},
            "weather": [{"main": "Clouds", "icon": "04d"}],
            "pop": 0.0
        }));
    }

    json!({ "cod": "200", "cnt": list.len(), "list": list })
}

mod common;

use chrono::{DateTime, Utc};
use common::{two_day_forecast_body, HOUR, JAN_15};
use std::collections::HashSet;
use weather_dashboard::api::models::ForecastResponse;
use weather_dashboard::forecast::{aggregate, bucket_by_day, PrecipitationKind, RawForecastSample};
use weather_dashboard::report;
use weather_dashboard::units::TemperatureUnit;

fn at(offset_hours: i64) -> RawForecastSample {
    RawForecastSample {
        timestamp_utc: DateTime::<Utc>::from_timestamp(JAN_15 + offset_hours * HOUR, 0).unwrap(),
        min_temperature_c: None,
        max_temperature_c: None,
        rain_volume_3h_mm: None,
        snow_volume_3h_mm: None,
        precipitation_probability: None,
        condition_code: None,
        icon_code: None,
    }
}

fn samples_from_fixture() -> Vec<RawForecastSample> {
    let response: ForecastResponse =
        serde_json::from_value(two_day_forecast_body()).expect("Invalid fixture");
    response.into_samples().expect("Conversion failed")
}

/// Test the two-day scenario end to end from provider JSON
#[test]
fn test_two_day_scenario() {
    let samples = samples_from_fixture();
    assert_eq!(samples.len(), 8);

    let days = aggregate(&samples);
    assert_eq!(days.len(), 2);

    let first = &days[0];
    assert_eq!(first.date_key(), "2024-01-15");
    assert_eq!(first.weekday_label, "Mon");
    assert_eq!(first.condition, "Rain");
    assert_eq!(first.condition_label, "Rain");
    assert_eq!(first.precipitation_mm, 1.2);
    assert_eq!(first.precipitation_probability_percent, 60);
    assert_eq!(first.precipitation_kind, PrecipitationKind::Rain);
    assert_eq!(first.icon_code.as_deref(), Some("10n"));

    let second = &days[1];
    assert_eq!(second.date_key(), "2024-01-16");
    assert_eq!(second.weekday_label, "Tue");
    assert_eq!(second.condition, "Clouds");
    assert_eq!(second.condition_label, "Cloudy");
    assert_eq!(second.condition_emoji, "☁️");
    assert_eq!(second.min_temperature_c, Some(0.0));
    assert_eq!(second.max_temperature_c, Some(7.0));
    assert_eq!(second.precipitation_probability_percent, 0);
    assert_eq!(second.precipitation_mm, 0.0);
    assert_eq!(second.precipitation_kind, PrecipitationKind::None);
}

/// Test that arrival order does not change bucket membership
#[test]
fn test_reversed_input_same_buckets() {
    let samples = samples_from_fixture();
    let mut reversed = samples.clone();
    reversed.reverse();

    let forward = aggregate(&samples);
    let backward = aggregate(&reversed);

    assert_eq!(forward.len(), backward.len());
    for (a, b) in forward.iter().zip(&backward) {
        assert_eq!(a.date, b.date);
        assert_eq!(a.min_temperature_c, b.min_temperature_c);
        assert_eq!(a.max_temperature_c, b.max_temperature_c);
        assert_eq!(a.precipitation_mm, b.precipitation_mm);
        assert_eq!(a.precipitation_probability_percent, b.precipitation_probability_percent);
    }
}

/// Test horizon, ordering and uniqueness over a week of samples
#[test]
fn test_output_bounded_and_strictly_ascending() {
    // Seven days of samples, shuffled by walking the hours with a stride
    let samples: Vec<_> = (0..56).map(|i| at((i * 17) % 168)).collect();
    let distinct: HashSet<_> = samples.iter().map(|s| s.date_key()).collect();
    assert_eq!(distinct.len(), 7);

    let days = aggregate(&samples);
    assert_eq!(days.len(), 5);
    assert!(days.windows(2).all(|w| w[0].date < w[1].date));
    assert_eq!(days[0].date_key(), "2024-01-15");
    assert_eq!(days[4].date_key(), "2024-01-19");
}

/// Test that fewer distinct days than the horizon emits each of them
#[test]
fn test_output_matches_distinct_days() {
    let samples = vec![at(50), at(2), at(51)];
    let days = aggregate(&samples);
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].date_key(), "2024-01-15");
    assert_eq!(days[1].date_key(), "2024-01-17");
}

/// Test that the running total equals the sum of the contributions
#[test]
fn test_precipitation_total_is_sum() {
    let volumes = [0.1, 0.25, 0.0, 1.05, 0.3];
    let samples: Vec<_> = volumes
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let mut s = at(i as i64 * 3);
            if i % 2 == 0 {
                s.rain_volume_3h_mm = Some(v);
            } else {
                s.snow_volume_3h_mm = Some(v);
            }
            s
        })
        .collect();

    let buckets = bucket_by_day(&samples);
    let bucket = buckets.values().next().expect("Missing bucket");
    let expected: f64 = volumes.iter().sum();
    assert!((bucket.total_precipitation_mm - expected).abs() < 1e-9);
    assert!(bucket.saw_rain);
    assert!(bucket.saw_snow);

    let days = aggregate(&samples);
    assert_eq!(days[0].precipitation_mm, 1.7);
    assert_eq!(days[0].precipitation_kind, PrecipitationKind::RainAndSnow);
}

/// Test that samples without temperatures still feed the other fields
#[test]
fn test_null_temperatures_still_aggregate() {
    let mut a = at(0);
    a.precipitation_probability = Some(0.35);
    a.condition_code = Some("Snow".to_string());
    a.snow_volume_3h_mm = Some(0.8);
    let mut b = at(3);
    b.condition_code = Some("Snow".to_string());

    let days = aggregate(&[a, b]);
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].min_temperature_c, None);
    assert_eq!(days[0].max_temperature_c, None);
    assert_eq!(days[0].precipitation_probability_percent, 35);
    assert_eq!(days[0].precipitation_mm, 0.8);
    assert_eq!(days[0].precipitation_kind, PrecipitationKind::Snow);
    assert_eq!(days[0].condition_label, "Snow");
    assert_eq!(days[0].condition_emoji, "❄️");

    let line = report::render_forecast_day(&days[0], TemperatureUnit::Fahrenheit);
    assert!(line.contains("no data"));
    assert!(line.contains("35% precipitation, 0.8 mm"));
}

/// Test that a blank condition code from the provider reads as clear sky
#[test]
fn test_blank_condition_from_provider() {
    let body = serde_json::json!({
        "list": [{"dt": JAN_15, "weather": [{"main": "", "icon": "01d"}]}]
    });
    let response: ForecastResponse = serde_json::from_value(body).expect("Invalid body");
    let days = aggregate(&response.into_samples().expect("Conversion failed"));

    assert_eq!(days.len(), 1);
    assert_eq!(days[0].condition, "Clear");
    assert_eq!(days[0].condition_label, "Sunny");
    assert_eq!(days[0].condition_emoji, "☀️");

    let line = report::render_forecast_day(&days[0], TemperatureUnit::Celsius);
    assert!(line.contains("Sunny"));
    assert!(line.ends_with("https://openweathermap.org/img/wn/01d.png"));
}

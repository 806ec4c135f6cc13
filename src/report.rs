//! Plain-text rendering of dashboard state.

use crate::api::models::CurrentConditions;
use crate::api::CityWeather;
use crate::catalog::{self, City, CityId};
use crate::conditions;
use crate::forecast::DailySummary;
use crate::session::ViewState;
use crate::units::{self, TemperatureUnit};
use std::fmt::Write;

const NO_DATA: &str = "no data";
const NO_PRECIPITATION: &str = "no precipitation";
const COMPASS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// 8-point compass direction for a wind bearing in degrees.
pub fn wind_direction(degrees: Option<f64>) -> Option<&'static str> {
    let degrees = degrees?;
    let index = ((degrees / 45.0).round() as i64).rem_euclid(8) as usize;
    Some(COMPASS[index])
}

pub fn icon_url(icon_code: &str, large: bool) -> String {
    if large {
        format!("{}/{}@2x.png", ICON_BASE_URL, icon_code)
    } else {
        format!("{}/{}.png", ICON_BASE_URL, icon_code)
    }
}

pub fn format_temperature(value_celsius: Option<f64>, unit: TemperatureUnit) -> String {
    match value_celsius {
        Some(value) => format!("{}{}", units::convert(value, unit), unit.symbol()),
        None => NO_DATA.to_string(),
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn or_no_data<T: std::fmt::Display>(value: Option<T>, suffix: &str) -> String {
    match value {
        Some(v) => format!("{}{}", v, suffix),
        None => NO_DATA.to_string(),
    }
}

pub fn render_current(city: &City, current: &CurrentConditions, unit: TemperatureUnit) -> String {
    let code = current.condition_code.as_deref();
    let mut out = String::new();

    let _ = writeln!(out, "{}", city.name);
    let _ = writeln!(
        out,
        "  {}  {} {}",
        format_temperature(current.temperature_c, unit),
        conditions::emoji(code),
        conditions::describe(code)
    );
    if let Some(icon) = current.icon_code.as_deref() {
        let _ = writeln!(out, "  Icon: {}", icon_url(icon, true));
    }

    let wind_speed = current
        .wind_speed_kmh
        .map(|kmh| format!("{} km/h", round_one_decimal(kmh)))
        .unwrap_or_else(|| NO_DATA.to_string());
    let direction = wind_direction(current.wind_degrees)
        .map(|d| format!("direction {}", d))
        .unwrap_or_else(|| "direction: no data".to_string());
    let _ = writeln!(out, "  Wind: {}, {}", wind_speed, direction);
    let _ = writeln!(out, "  Cloudiness: {}", or_no_data(current.cloudiness_percent, "%"));
    let _ = writeln!(out, "  Humidity: {}", or_no_data(current.humidity_percent, "%"));
    let _ = writeln!(out, "  Pressure: {}", or_no_data(current.pressure_hpa, " hPa"));

    out
}

/// Today's precipitation panel, built from the first forecast day.
pub fn render_today(today: Option<&DailySummary>) -> String {
    let Some(today) = today else {
        return "Precipitation (today): no data\n".to_string();
    };

    let dry = today.precipitation_probability_percent == 0;
    let probability = if dry {
        format!("0% ({})", NO_PRECIPITATION)
    } else {
        format!("{}%", today.precipitation_probability_percent)
    };
    let kind = if dry {
        NO_PRECIPITATION
    } else {
        today.precipitation_kind.label()
    };
    let amount = if today.precipitation_mm == 0.0 {
        format!("0 mm ({})", NO_PRECIPITATION)
    } else {
        format!("{} mm", today.precipitation_mm)
    };

    format!(
        "Precipitation (today)\n  Probability: {}\n  Type: {}\n  Amount: {}\n",
        probability, kind, amount
    )
}

pub fn render_forecast_day(day: &DailySummary, unit: TemperatureUnit) -> String {
    let temperatures = match (day.min_temperature_c, day.max_temperature_c) {
        (Some(min), Some(max)) => format!(
            "{} – {}",
            format_temperature(Some(min), unit),
            format_temperature(Some(max), unit)
        ),
        _ => NO_DATA.to_string(),
    };

    let precipitation = if day.precipitation_probability_percent == 0 {
        NO_PRECIPITATION.to_string()
    } else {
        format!(
            "{}% precipitation, {} mm",
            day.precipitation_probability_percent, day.precipitation_mm
        )
    };

    let mut line = format!(
        "{:<4}{} {:<12}{:<16}{}",
        day.weekday_label, day.condition_emoji, day.condition_label, temperatures, precipitation
    );
    if let Some(icon) = day.icon_code.as_deref() {
        let _ = write!(line, "  {}", icon_url(icon, false));
    }
    line
}

pub fn render_forecast(days: &[DailySummary], unit: TemperatureUnit) -> String {
    if days.is_empty() {
        return "5-day forecast: no data\n".to_string();
    }

    let mut out = String::from("5-day forecast\n");
    for day in days {
        let _ = writeln!(out, "  {}", render_forecast_day(day, unit));
    }
    out
}

pub fn render_city_weather(weather: &CityWeather, unit: TemperatureUnit) -> String {
    format!(
        "{}\n{}\n{}",
        render_current(&weather.city, &weather.current, unit),
        render_today(weather.today()),
        render_forecast(&weather.days, unit)
    )
}

pub fn render_view(view: &ViewState, unit: TemperatureUnit) -> String {
    match view {
        ViewState::Idle => "No city selected.\n".to_string(),
        ViewState::Loading(city) => format!("Loading {}...\n", city.name),
        ViewState::Ready(weather) => render_city_weather(weather, unit),
        ViewState::Failed { city, message } => format!("{}: {}\n", city.name, message),
    }
}

/// City list grouped into Polish and worldwide sections, favorites starred.
pub fn render_city_list(cities: &[&City], favorites: &[CityId]) -> String {
    if cities.is_empty() {
        return "No cities to show.\n".to_string();
    }

    let (domestic, foreign) = catalog::partition_domestic(cities);
    let mut out = String::new();
    for (title, group) in [("Cities in Poland", domestic), ("Cities worldwide", foreign)] {
        if group.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{}", title);
        for city in group {
            let star = if favorites.contains(&city.id) { " ★" } else { "" };
            let _ = writeln!(out, "  [{:>2}] {}{}", city.id, city.name, star);
        }
    }
    out
}

//! OpenWeatherMap payloads for `/weather` and `/forecast` (metric units).
//!
//! Every field the dashboard reads is optional on the wire; the conversions
//! below only fail on a timestamp chrono cannot represent.

use crate::error::{AppError, Result};
use crate::forecast::RawForecastSample;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// m/s to km/h.
const MPS_TO_KMH: f64 = 3.6;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct WeatherTag {
    pub main: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct MainBlock {
    pub temp: Option<f64>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub humidity: Option<u32>,
    pub pressure: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct VolumeBlock {
    #[serde(rename = "3h")]
    pub three_hours: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct WindBlock {
    pub speed: Option<f64>,
    pub deg: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CloudsBlock {
    pub all: Option<u32>,
}

/// One entry of the `/forecast` list.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastItem {
    pub dt: i64,
    #[serde(default)]
    pub main: Option<MainBlock>,
    #[serde(default)]
    pub weather: Vec<WeatherTag>,
    #[serde(default)]
    pub pop: Option<f64>,
    #[serde(default)]
    pub rain: Option<VolumeBlock>,
    #[serde(default)]
    pub snow: Option<VolumeBlock>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ForecastItem>,
}

/// Body of the `/weather` endpoint.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CurrentResponse {
    #[serde(default)]
    pub main: Option<MainBlock>,
    #[serde(default)]
    pub weather: Vec<WeatherTag>,
    #[serde(default)]
    pub wind: Option<WindBlock>,
    #[serde(default)]
    pub clouds: Option<CloudsBlock>,
}

/// Current conditions for a location, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temperature_c: Option<f64>,
    pub condition_code: Option<String>,
    pub icon_code: Option<String>,
    pub wind_speed_kmh: Option<f64>,
    pub wind_degrees: Option<f64>,
    pub cloudiness_percent: Option<u32>,
    pub humidity_percent: Option<u32>,
    pub pressure_hpa: Option<f64>,
}

impl ForecastItem {
    pub fn into_sample(self) -> Result<RawForecastSample> {
        let timestamp_utc = DateTime::<Utc>::from_timestamp(self.dt, 0).ok_or_else(|| {
            AppError::InvalidData(format!("Forecast timestamp {} out of range", self.dt))
        })?;

        let main = self.main.unwrap_or_default();
        let tag = self.weather.into_iter().next().unwrap_or_default();

        Ok(RawForecastSample {
            timestamp_utc,
            min_temperature_c: main.temp_min,
            max_temperature_c: main.temp_max,
            rain_volume_3h_mm: self.rain.and_then(|r| r.three_hours),
            snow_volume_3h_mm: self.snow.and_then(|s| s.three_hours),
            precipitation_probability: self.pop,
            condition_code: tag.main,
            icon_code: tag.icon,
        })
    }
}

impl ForecastResponse {
    pub fn into_samples(self) -> Result<Vec<RawForecastSample>> {
        self.list.into_iter().map(ForecastItem::into_sample).collect()
    }
}

impl From<CurrentResponse> for CurrentConditions {
    fn from(response: CurrentResponse) -> Self {
        let main = response.main.unwrap_or_default();
        let tag = response.weather.into_iter().next().unwrap_or_default();
        let wind = response.wind.unwrap_or_default();

        Self {
            temperature_c: main.temp,
            condition_code: tag.main,
            icon_code: tag.icon,
            wind_speed_kmh: wind.speed.map(|speed| speed * MPS_TO_KMH),
            wind_degrees: wind.deg,
            cloudiness_percent: response.clouds.and_then(|c| c.all),
            humidity_percent: main.humidity,
            pressure_hpa: main.pressure,
        }
    }
}

use crate::api::models::{CurrentConditions, CurrentResponse, ForecastResponse};
use crate::catalog::City;
use crate::config::ProviderConfig;
use crate::error::{AppError, Result};
use crate::forecast::{self, DailySummary, RawForecastSample};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

/// Everything the dashboard shows for one city.
#[derive(Debug, Clone)]
pub struct CityWeather {
    pub city: City,
    pub current: CurrentConditions,
    pub days: Vec<DailySummary>,
}

impl CityWeather {
    /// Precipitation outlook for today, i.e. the first forecast day.
    pub fn today(&self) -> Option<&DailySummary> {
        self.days.first()
    }
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherProvider {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(AppError::BlankApiKey);
        }

        let client = Client::builder()
            .user_agent(concat!("weather-dashboard/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.trim().to_string(),
        })
    }

    /// Build a provider from config, reading the key from the environment.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let api_key = config.api_key()?;
        Self::new(
            &config.base_url,
            &api_key,
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub async fn current_conditions(&self, latitude: f64, longitude: f64) -> Result<CurrentConditions> {
        let response: CurrentResponse = self.get_json("weather", latitude, longitude).await?;
        Ok(response.into())
    }

    pub async fn forecast(&self, latitude: f64, longitude: f64) -> Result<Vec<RawForecastSample>> {
        let response: ForecastResponse = self.get_json("forecast", latitude, longitude).await?;
        response.into_samples()
    }

    /// Fetch current conditions and the forecast together and aggregate the
    /// forecast into daily summaries. Either request failing fails the whole load.
    pub async fn city_weather(&self, city: &City) -> Result<CityWeather> {
        let (current, samples) = tokio::try_join!(
            self.current_conditions(city.latitude, city.longitude),
            self.forecast(city.latitude, city.longitude),
        )?;

        let days = forecast::aggregate(&samples);
        info!(
            "Loaded weather for {}: {} samples, {} forecast days",
            city.name,
            samples.len(),
            days.len()
        );

        Ok(CityWeather {
            city: *city,
            current,
            days,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("Requesting {} for ({}, {})", url, latitude, longitude);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("units", "metric".to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

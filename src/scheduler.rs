use crate::api::{CityWeather, WeatherProvider};
use crate::catalog::City;
use crate::config::SchedulerConfig;
use crate::report;
use crate::units::TemperatureUnit;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio::time::{interval, Duration};
use tracing::{error, info, warn};

/// Outcome of refreshing every watched city once.
#[derive(Debug, Default)]
pub struct RefreshReport {
    /// Loaded cities in completion order, which is not the order they were requested in.
    pub loaded: Vec<CityWeather>,
    pub failed: usize,
}

/// Periodically refreshes a fixed set of cities until shutdown.
pub struct Scheduler {
    config: SchedulerConfig,
    provider: Arc<WeatherProvider>,
    cities: Vec<City>,
    unit: TemperatureUnit,
    shutdown_rx: watch::Receiver<bool>,
}

impl Scheduler {
    pub fn new(
        config: SchedulerConfig,
        provider: Arc<WeatherProvider>,
        cities: Vec<City>,
        unit: TemperatureUnit,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            config,
            provider,
            cities,
            unit,
            shutdown_rx,
        }
    }

    pub async fn run(&mut self) {
        let initial_delay = Duration::from_secs(self.config.initial_delay_seconds);
        let poll_interval = Duration::from_secs(self.config.interval_minutes * 60);

        info!(
            "Scheduler starting with {}s initial delay, {}m interval, {} cities",
            self.config.initial_delay_seconds,
            self.config.interval_minutes,
            self.cities.len()
        );

        // Initial delay
        tokio::select! {
            _ = tokio::time::sleep(initial_delay) => {},
            _ = self.shutdown_rx.changed() => {
                info!("Shutdown received during initial delay");
                return;
            }
        }

        // Run immediately, then on interval
        self.refresh_and_print().await;

        let mut ticker = interval(poll_interval);
        ticker.tick().await; // First tick is immediate, skip it

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.refresh_and_print().await;
                }
                _ = self.shutdown_rx.changed() => {
                    info!("Shutdown signal received, stopping scheduler");
                    break;
                }
            }
        }
    }

    async fn refresh_and_print(&self) {
        let report = self.refresh_once().await;
        for weather in &report.loaded {
            println!("{}", report::render_city_weather(weather, self.unit));
        }
        if report.failed > 0 {
            println!("Failed to fetch weather data for {} cities.", report.failed);
        }
    }

    /// Load every city concurrently and collect the results as they finish.
    pub async fn refresh_once(&self) -> RefreshReport {
        info!("Starting refresh of {} cities", self.cities.len());

        let mut tasks = JoinSet::new();
        for city in &self.cities {
            let provider = Arc::clone(&self.provider);
            let city = *city;
            tasks.spawn(async move {
                let result = provider.city_weather(&city).await;
                (city, result)
            });
        }

        let mut report = RefreshReport::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(weather))) => report.loaded.push(weather),
                Ok((city, Err(e))) => {
                    error!("Error refreshing {}: {}", city.name, e);
                    report.failed += 1;
                }
                Err(e) => {
                    warn!("Refresh task did not complete: {}", e);
                    report.failed += 1;
                }
            }
        }

        info!(
            "Refresh completed: {} loaded, {} failed",
            report.loaded.len(),
            report.failed
        );
        report
    }
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown");
        }
    }
}

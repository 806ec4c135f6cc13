//! City selection and load supersession.
//!
//! Every selection takes a [`Ticket`] from the [`SelectionTracker`]. A load
//! result is committed to the view only if its ticket is still the latest one;
//! anything older is dropped without being surfaced.

use crate::api::{CityWeather, WeatherProvider};
use crate::catalog::City;
use crate::error::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error};

#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    generation: Arc<AtomicU64>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new selection, superseding all earlier tickets.
    pub fn begin(&self) -> Ticket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket {
            generation,
            latest: Arc::clone(&self.generation),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ticket {
    generation: u64,
    latest: Arc<AtomicU64>,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.generation
    }
}

/// What the dashboard currently shows.
#[derive(Debug, Clone)]
pub enum ViewState {
    Idle,
    Loading(City),
    Ready(CityWeather),
    Failed { city: City, message: String },
}

/// A finished load, tagged with the ticket it was started under.
#[derive(Debug)]
pub struct LoadOutcome {
    pub ticket: Ticket,
    pub city: City,
    pub result: Result<CityWeather>,
}

pub struct Dashboard {
    provider: Arc<WeatherProvider>,
    tracker: SelectionTracker,
    outcomes: mpsc::UnboundedSender<LoadOutcome>,
    view: ViewState,
}

impl Dashboard {
    /// Create a dashboard and the receiver its loads report to.
    ///
    /// Feed every received [`LoadOutcome`] back into [`Dashboard::commit`].
    pub fn new(provider: Arc<WeatherProvider>) -> (Self, mpsc::UnboundedReceiver<LoadOutcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let dashboard = Self {
            provider,
            tracker: SelectionTracker::new(),
            outcomes: tx,
            view: ViewState::Idle,
        };
        (dashboard, rx)
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn tracker(&self) -> &SelectionTracker {
        &self.tracker
    }

    /// The city currently selected, whether loaded or not.
    pub fn selected_city(&self) -> Option<&City> {
        match &self.view {
            ViewState::Idle => None,
            ViewState::Loading(city) | ViewState::Failed { city, .. } => Some(city),
            ViewState::Ready(weather) => Some(&weather.city),
        }
    }

    /// Select `city` and start loading it in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn select(&mut self, city: &City) -> Ticket {
        let ticket = self.tracker.begin();
        self.view = ViewState::Loading(*city);

        let provider = Arc::clone(&self.provider);
        let tx = self.outcomes.clone();
        let task_ticket = ticket.clone();
        let city = *city;

        tokio::spawn(async move {
            let result = provider.city_weather(&city).await;
            let _ = tx.send(LoadOutcome {
                ticket: task_ticket,
                city,
                result,
            });
        });

        ticket
    }

    /// Apply a finished load. Returns false if it was superseded and dropped.
    pub fn commit(&mut self, outcome: LoadOutcome) -> bool {
        if !outcome.ticket.is_current() {
            debug!(
                "Discarding superseded load for {} (generation {})",
                outcome.city.name,
                outcome.ticket.generation()
            );
            return false;
        }

        self.view = match outcome.result {
            Ok(weather) => ViewState::Ready(weather),
            Err(e) => {
                error!("Failed to load weather for {}: {}", outcome.city.name, e);
                ViewState::Failed {
                    city: outcome.city,
                    message: e.user_message(),
                }
            }
        };
        true
    }
}

//! Command dispatch.

use crate::api::WeatherProvider;
use crate::catalog;
use crate::cli::{BrowseInput, Cli, Command, BROWSE_HELP};
use crate::config::Config;
use crate::error::Result;
use crate::report;
use crate::scheduler::{shutdown_signal, Scheduler};
use crate::session::Dashboard;
use crate::settings::{Settings, SettingsStore};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{info, warn};

pub async fn run(cli: Cli) -> Result<()> {
    let config = Config::load_or_default(&cli.config)?;
    let mut store = SettingsStore::open(&config.storage.settings_path);

    match cli.command {
        Command::Cities { search } => {
            let cities = catalog::search(search.as_deref().unwrap_or(""));
            print!(
                "{}",
                report::render_city_list(&cities, &store.settings().favorites)
            );
        }
        Command::Favorites => {
            let cities = catalog::favorites(&store.settings().favorites);
            if cities.is_empty() {
                println!("No favorite cities. Add one with `favorite <CITY>`.");
            } else {
                print!(
                    "{}",
                    report::render_city_list(&cities, &store.settings().favorites)
                );
            }
        }
        Command::Favorite { city } => {
            let city = catalog::resolve(&city)?;
            let added = store.toggle_favorite(city.id)?;
            if added {
                println!("Added {} to favorites.", city.name);
            } else {
                println!("Removed {} from favorites.", city.name);
            }
        }
        Command::Unit { unit } => {
            store.set_unit(unit)?;
            println!("Temperature unit set to {}.", unit.symbol());
        }
        Command::Show { city } => {
            let city = match city {
                Some(query) => catalog::resolve(&query)?,
                None => &catalog::all()[0],
            };
            let provider = WeatherProvider::from_config(&config.provider)?;
            match provider.city_weather(city).await {
                Ok(weather) => print!(
                    "{}",
                    report::render_city_weather(&weather, store.settings().unit)
                ),
                Err(e) => {
                    warn!("Weather fetch for {} failed: {}", city.name, e);
                    println!("{}", e.user_message());
                    return Err(e);
                }
            }
        }
        Command::Browse => {
            let provider = WeatherProvider::from_config(&config.provider)?;
            browse(provider, &mut store).await?;
        }
        Command::Watch => {
            let provider = WeatherProvider::from_config(&config.provider)?;
            watch_favorites(&config, provider, store.settings()).await;
        }
    }

    Ok(())
}

async fn browse(provider: WeatherProvider, store: &mut SettingsStore) -> Result<()> {
    let (mut dashboard, mut outcomes) = Dashboard::new(Arc::new(provider));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", BROWSE_HELP);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match BrowseInput::parse(&line) {
                    BrowseInput::Empty => {}
                    BrowseInput::Quit => break,
                    BrowseInput::List => {
                        print!(
                            "{}",
                            report::render_city_list(&catalog::search(""), &store.settings().favorites)
                        );
                    }
                    BrowseInput::Unit(unit) => {
                        store.set_unit(unit)?;
                        print!("{}", report::render_view(dashboard.view(), unit));
                    }
                    BrowseInput::ToggleFavorite => match dashboard.selected_city() {
                        Some(city) => {
                            let added = store.toggle_favorite(city.id)?;
                            println!(
                                "{} {} favorites.",
                                city.name,
                                if added { "added to" } else { "removed from" }
                            );
                        }
                        None => println!("Select a city first."),
                    },
                    BrowseInput::Select(query) => match catalog::resolve(&query) {
                        Ok(city) => {
                            dashboard.select(city);
                            print!("{}", report::render_view(dashboard.view(), store.settings().unit));
                        }
                        Err(e) => println!("{}", e),
                    },
                }
            }
            Some(outcome) = outcomes.recv() => {
                if dashboard.commit(outcome) {
                    print!("{}", report::render_view(dashboard.view(), store.settings().unit));
                }
            }
        }
    }

    Ok(())
}

async fn watch_favorites(config: &Config, provider: WeatherProvider, settings: &Settings) {
    // Favorites are read once; restart to pick up changes
    let cities: Vec<_> = catalog::favorites(&settings.favorites)
        .into_iter()
        .copied()
        .collect();

    if cities.is_empty() {
        println!("No favorite cities to watch. Add one with `favorite <CITY>`.");
        return;
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    let mut scheduler = Scheduler::new(
        config.scheduler.clone(),
        Arc::new(provider),
        cities,
        settings.unit,
        shutdown_rx,
    );
    scheduler.run().await;
    info!("Stopped watching favorites");
}

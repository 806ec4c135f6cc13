//! Command-line surface of the dashboard.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::units::TemperatureUnit;

#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather dashboard for a fixed list of cities")]
pub struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, global = true, default_value = "config/config.yaml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List cities, optionally filtered by name.
    Cities {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show current conditions and the 5-day forecast for a city (id or name).
    Show { city: Option<String> },
    /// List favorite cities.
    Favorites,
    /// Add a city to favorites, or remove it if already there.
    Favorite { city: String },
    /// Set the temperature unit used for display.
    Unit {
        #[arg(value_enum)]
        unit: TemperatureUnit,
    },
    /// Interactive mode: type a city to select it; a new selection replaces any pending one.
    Browse,
    /// Refresh favorite cities on the configured interval until interrupted.
    Watch,
}

/// One line of input in browse mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseInput {
    Select(String),
    ToggleFavorite,
    Unit(TemperatureUnit),
    List,
    Quit,
    Empty,
}

impl BrowseInput {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head {
            "" => BrowseInput::Empty,
            ":q" | ":quit" => BrowseInput::Quit,
            ":fav" => BrowseInput::ToggleFavorite,
            ":list" => BrowseInput::List,
            ":unit" => BrowseInput::Unit(TemperatureUnit::from_code(rest)),
            _ => BrowseInput::Select(line.to_string()),
        }
    }
}

pub const BROWSE_HELP: &str = "Type a city name or id to select it. \
Commands: :fav (toggle favorite), :unit C|F|K, :list, :q";

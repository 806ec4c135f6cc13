use crate::catalog::CityId;
use crate::error::Result;
use crate::units::TemperatureUnit;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// User preferences persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default, deserialize_with = "deserialize_unit")]
    pub unit: TemperatureUnit,
    #[serde(default)]
    pub favorites: Vec<CityId>,
}

/// Unknown unit codes fall back to Celsius instead of rejecting the file.
fn deserialize_unit<'de, D>(deserializer: D) -> std::result::Result<TemperatureUnit, D::Error>
where
    D: Deserializer<'de>,
{
    let code = Option::<String>::deserialize(deserializer)?;
    Ok(code
        .as_deref()
        .map(TemperatureUnit::from_code)
        .unwrap_or_default())
}

impl Settings {
    pub fn is_favorite(&self, id: CityId) -> bool {
        self.favorites.contains(&id)
    }

    /// Remove `id` if present, otherwise append it. Returns whether it is now a favorite.
    pub fn toggle_favorite(&mut self, id: CityId) -> bool {
        if self.is_favorite(id) {
            self.favorites.retain(|&x| x != id);
            false
        } else {
            self.favorites.push(id);
            true
        }
    }
}

/// JSON-file backed settings. Read once on open, written on every change.
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Open the store at `path`.
    ///
    /// A missing, unreadable or corrupt file yields default settings.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let settings = load_settings(&path);
        Self { path, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` and persist the result.
    ///
    /// The change is kept only if the write succeeds.
    pub fn update<F, T>(&mut self, change: F) -> Result<T>
    where
        F: FnOnce(&mut Settings) -> T,
    {
        let mut next = self.settings.clone();
        let outcome = change(&mut next);
        write_settings(&self.path, &next)?;
        self.settings = next;
        Ok(outcome)
    }

    pub fn set_unit(&mut self, unit: TemperatureUnit) -> Result<()> {
        self.update(|s| s.unit = unit)
    }

    pub fn toggle_favorite(&mut self, id: CityId) -> Result<bool> {
        self.update(|s| s.toggle_favorite(id))
    }
}

fn write_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, json)?;
    debug!("Saved settings to {}", path.display());
    Ok(())
}

fn load_settings(path: &Path) -> Settings {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("No settings at {}, using defaults", path.display());
            return Settings::default();
        }
        Err(e) => {
            warn!("Failed to read settings {}: {}. Using defaults", path.display(), e);
            return Settings::default();
        }
    };

    match serde_json::from_str::<Settings>(&content) {
        Ok(settings) => {
            debug!(
                "Loaded settings: unit={}, {} favorites",
                settings.unit,
                settings.favorites.len()
            );
            settings
        }
        Err(e) => {
            warn!("Ignoring corrupt settings {}: {}", path.display(), e);
            Settings::default()
        }
    }
}

use crate::error::{AppError, Result};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout", deserialize_with = "deserialize_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_api_key_env() -> String {
    "OPENWEATHER_API_KEY".to_string()
}

fn default_timeout() -> u64 {
    10
}

/// Custom deserializer that handles seconds as both number and string
///
/// Accepts:
/// - `timeout_seconds: 10` (number)
/// - `timeout_seconds: "10"` (string that parses to number)
/// - `timeout_seconds: ${TIMEOUT}` (env var substituted to either)
fn deserialize_seconds<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SecondsValue {
        Number(u64),
        String(String),
    }

    match SecondsValue::deserialize(deserializer)? {
        SecondsValue::Number(n) => Ok(n),
        SecondsValue::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| serde::de::Error::custom(format!("Invalid number of seconds: '{}'", s))),
    }
}

impl ProviderConfig {
    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> Result<String> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
            _ => Err(AppError::MissingApiKey(self.api_key_env.clone())),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_settings_path")]
    pub settings_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            settings_path: default_settings_path(),
        }
    }
}

fn default_settings_path() -> PathBuf {
    PathBuf::from("weather-settings.json")
}

#[derive(Debug, Deserialize, Clone)]
pub struct SchedulerConfig {
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u64,
    #[serde(default)]
    pub initial_delay_seconds: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval_minutes: default_interval_minutes(),
            initial_delay_seconds: 0,
        }
    }
}

fn default_interval_minutes() -> u64 {
    15
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| AppError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_yaml(&content)
    }

    /// Load `path` if it exists, otherwise fall back to built-in defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            tracing::info!(
                "No config file at {}, using defaults",
                path.as_ref().display()
            );
            let config = Config::default();
            config.validate()?;
            Ok(config)
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // Substitute environment variables
        let expanded = expand_env_vars(content)?;

        let config: Config = serde_yaml::from_str(&expanded)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    ///
    /// Checks for:
    /// - Valid HTTPS provider URL
    /// - Positive timeout and refresh interval
    /// - Non-empty settings path and key variable name
    fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.provider.base_url).map_err(|e| {
            AppError::Config(format!(
                "Invalid provider base_url '{}': {}",
                self.provider.base_url, e
            ))
        })?;

        if parsed.scheme() != "https" {
            return Err(AppError::Config(format!(
                "Provider base_url must use HTTPS, got: {}",
                parsed.scheme()
            )));
        }

        if self.provider.api_key_env.trim().is_empty() {
            return Err(AppError::Config(
                "Provider api_key_env cannot be empty".to_string(),
            ));
        }

        if self.provider.timeout_seconds == 0 {
            return Err(AppError::Config(
                "Provider timeout_seconds must be greater than 0".to_string(),
            ));
        }

        if self.storage.settings_path.as_os_str().is_empty() {
            return Err(AppError::Config(
                "Storage settings_path cannot be empty".to_string(),
            ));
        }

        if self.scheduler.interval_minutes == 0 {
            return Err(AppError::Config(
                "Scheduler interval_minutes must be greater than 0".to_string(),
            ));
        }

        // Warn if interval is too short for the provider's free tier
        if self.scheduler.interval_minutes < 5 {
            tracing::warn!(
                "Scheduler interval of {} minutes is very short, consider using at least 5 minutes",
                self.scheduler.interval_minutes
            );
        }

        Ok(())
    }
}

fn expand_env_vars(content: &str) -> Result<String> {
    let mut result = content.to_string();
    let re = regex_lite::Regex::new(r"\$\{([^}]+)\}")
        .map_err(|e| AppError::Config(format!("Invalid env var pattern: {}", e)))?;

    let mut missing_vars = Vec::new();

    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        match std::env::var(var_name) {
            Ok(value) => {
                result = result.replace(&cap[0], &value);
            }
            Err(_) => {
                missing_vars.push(var_name.to_string());
            }
        }
    }

    if !missing_vars.is_empty() {
        return Err(AppError::Config(format!(
            "Missing required environment variable{}: {}\n\n\
             To fix this:\n\
             1. Create a .env file in the project root (copy .env.example)\n\
             2. Set the missing variable{}: export {}=<value>\n\
             3. Or set {} in your environment before running",
            if missing_vars.len() > 1 { "s" } else { "" },
            missing_vars.join(", "),
            if missing_vars.len() > 1 { "s" } else { "" },
            missing_vars[0],
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

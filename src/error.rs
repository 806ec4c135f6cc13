use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing API key: environment variable {0} is not set")]
    MissingApiKey(String),

    #[error("API key is blank")]
    BlankApiKey,

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown city: {0}")]
    UnknownCity(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl AppError {
    /// Short message suitable for showing in place of weather data.
    ///
    /// Transport and payload failures collapse into one generic message; the
    /// detailed error is logged by the caller.
    pub fn user_message(&self) -> String {
        match self {
            AppError::MissingApiKey(_) | AppError::BlankApiKey => "Missing API key.".to_string(),
            AppError::Http(_) | AppError::Json(_) | AppError::InvalidData(_) => {
                "Failed to fetch weather data.".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

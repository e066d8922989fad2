use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyllabusError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid exclusion pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("No curriculum table found at {url}")]
    MissingTable { url: String },

    #[error("Unknown course code: {code} (available: {})", .available.join(", "))]
    UnknownCourseCode { code: String, available: Vec<String> },

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },
}

pub type Result<T> = std::result::Result<T, SyllabusError>;

use std::error::Error as StdError;

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum SnapError {
    #[error("No URL specified. Use `pagesnap scrape <URL>` or set the SCRAPE_URL environment variable")]
    MissingUrl,

    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Browser session error: {0}")]
    Session(String),

    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("Navigation to {url} timed out after {secs}s")]
    NavigationTimeout { url: String, secs: u64 },

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Other(String),
}

impl SnapError {
    /// Render the error and every source in its chain, one per line.
    pub fn trace(&self) -> String {
        let mut trace = format!("{}: {}", self.kind(), self);
        let mut source = self.source();
        while let Some(cause) = source {
            trace.push_str("\n    caused by: ");
            trace.push_str(&cause.to_string());
            source = cause.source();
        }
        trace
    }

    /// Short, stable name of the error variant.
    pub fn kind(&self) -> &'static str {
        match self {
            SnapError::MissingUrl => "MissingUrl",
            SnapError::Launch(_) => "LaunchError",
            SnapError::Session(_) => "SessionError",
            SnapError::Navigation { .. } => "NavigationError",
            SnapError::NavigationTimeout { .. } => "NavigationTimeout",
            SnapError::Extraction(_) => "ExtractionError",
            SnapError::Http(_) => "HttpError",
            SnapError::InvalidUrl(_) => "InvalidUrl",
            SnapError::Io(_) => "IoError",
            SnapError::Json(_) => "JsonError",
            SnapError::Config(_) => "ConfigError",
            SnapError::Other(_) => "Error",
        }
    }
}

pub type Result<T> = std::result::Result<T, SnapError>;

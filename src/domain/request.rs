use crate::app::{Result, SnapError};

/// The single input of a scrape run: the target URL.
///
/// Only emptiness is checked here. Malformed URLs are passed through and fail
/// during navigation, where the failure ends up in the artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeRequest {
    url: String,
}

impl ScrapeRequest {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url = url.into().trim().to_string();
        if url.is_empty() {
            return Err(SnapError::MissingUrl);
        }
        Ok(Self { url })
    }

    /// Build a request from an optional CLI/environment value.
    pub fn from_option(url: Option<&str>) -> Result<Self> {
        url.map_or(Err(SnapError::MissingUrl), Self::new)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::document::{MAX_LINKS, MAX_PARAGRAPHS};
use crate::scraper::filter::{ResourceFilter, ResourceKind};
use crate::scraper::session::Viewport;

/// Which extraction strategy produces the artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Headless Chrome; scripts run, DOM is rendered
    #[default]
    Chrome,
    /// Plain HTTP GET plus static HTML parsing
    Static,
}

/// Configuration for the page extractors
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Extraction strategy used when `--engine` is not given (default: chrome)
    pub engine: EngineKind,

    /// Whether to run the browser in headless mode (default: true)
    pub headless: bool,

    /// Navigation timeout in seconds, until DOM content loaded (default: 60)
    pub timeout_secs: u64,

    /// Request timeout for the static extractor in seconds (default: 30)
    pub http_timeout_secs: u64,

    /// Page viewport width in CSS pixels (default: 1280)
    pub viewport_width: u32,

    /// Page viewport height in CSS pixels (default: 800)
    pub viewport_height: u32,

    /// Resource types aborted during page load
    pub blocked_resources: Vec<ResourceKind>,

    /// Maximum number of links kept (default and upper bound: 20)
    pub max_links: usize,

    /// Maximum number of paragraphs kept (default and upper bound: 10)
    pub max_paragraphs: usize,

    /// User agent string to use
    pub user_agent: Option<String>,

    /// Chrome/Chromium binary; looked up on PATH when unset
    pub chrome_executable: Option<PathBuf>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            engine: EngineKind::Chrome,
            headless: true,
            timeout_secs: 60,
            http_timeout_secs: 30,
            viewport_width: 1280,
            viewport_height: 800,
            blocked_resources: ResourceFilter::DEFAULT_BLOCKED.to_vec(),
            max_links: MAX_LINKS,
            max_paragraphs: MAX_PARAGRAPHS,
            user_agent: Some(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                    .to_string(),
            ),
            chrome_executable: None,
        }
    }
}

impl ScraperConfig {
    /// Get the navigation timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the static fetch timeout as a Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.viewport_width,
            height: self.viewport_height,
        }
    }

    pub fn resource_filter(&self) -> ResourceFilter {
        ResourceFilter::blocking(&self.blocked_resources)
    }
}

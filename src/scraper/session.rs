//! Capability interface over a headless rendering engine.
//!
//! ```text
//! RenderEngine::launch → RenderSession::open_page → RenderPage
//!     set_request_filter → navigate → evaluate → close
//! ```
//!
//! [`ChromeEngine`](crate::scraper::ChromeEngine) implements it over CDP;
//! tests implement it in memory.

use std::time::Duration;

use async_trait::async_trait;

use crate::app::Result;
use crate::scraper::config::ScraperConfig;
use crate::scraper::filter::ResourceFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
        }
    }
}

#[async_trait]
pub trait RenderEngine: Send + Sync {
    type Session: RenderSession;

    /// Start an engine process and return an exclusively owned session
    async fn launch(&self, config: &ScraperConfig) -> Result<Self::Session>;
}

#[async_trait]
pub trait RenderSession: Send + Sync {
    type Page: RenderPage;

    async fn open_page(&mut self, viewport: Viewport) -> Result<Self::Page>;

    /// Release the engine. Must be called on every exit path.
    async fn close(&mut self) -> Result<()>;
}

#[async_trait]
pub trait RenderPage: Send + Sync {
    /// Install the filter; it applies to every request made after this returns.
    async fn set_request_filter(&mut self, filter: ResourceFilter) -> Result<()>;

    /// Navigate and wait until DOM content is loaded, bounded by `timeout`.
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<()>;

    async fn evaluate(&mut self, script: &str) -> Result<serde_json::Value>;

    async fn close(&mut self) -> Result<()>;
}

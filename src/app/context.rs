use std::sync::Arc;

use crate::app::error::Result;
use crate::config::Config;
use crate::scraper::{BrowserExtractor, ChromeEngine, EngineKind, Extractor, StaticExtractor};
use crate::store::FileStore;

pub struct AppContext {
    pub config: Config,
    pub store: Arc<FileStore>,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        let store = Arc::new(FileStore::new(config.artifact.path.clone()));
        Self { config, store }
    }

    /// Build the extractor for `engine`, or the configured one when `None`.
    pub fn extractor(&self, engine: Option<EngineKind>) -> Result<Box<dyn Extractor>> {
        let scraper_config = self.config.scraper.clone();

        match engine.unwrap_or(scraper_config.engine) {
            EngineKind::Chrome => Ok(Box::new(BrowserExtractor::new(ChromeEngine, scraper_config))),
            EngineKind::Static => Ok(Box::new(StaticExtractor::new(scraper_config)?)),
        }
    }
}

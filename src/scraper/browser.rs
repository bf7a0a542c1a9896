use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::app::Result;
use crate::domain::{ScrapeRequest, ScrapedDocument};
use crate::scraper::config::ScraperConfig;
use crate::scraper::extractor::FieldExtractor;
use crate::scraper::session::{RenderEngine, RenderPage, RenderSession};
use crate::scraper::Extractor;

/// Extractor that renders the page in a headless engine before reading it
pub struct BrowserExtractor<E: RenderEngine> {
    engine: E,
    config: ScraperConfig,
    fields: FieldExtractor,
}

impl<E: RenderEngine> BrowserExtractor<E> {
    pub fn new(engine: E, config: ScraperConfig) -> Self {
        let fields = FieldExtractor::new(&config);
        Self {
            engine,
            config,
            fields,
        }
    }

    /// Open, filter, navigate and evaluate. The caller owns session cleanup.
    async fn scrape_page(&self, session: &mut E::Session, url: &str) -> Result<ScrapedDocument> {
        let mut page = session.open_page(self.config.viewport()).await?;

        // Must be active before the first request or early assets load unfiltered
        page.set_request_filter(self.config.resource_filter()).await?;

        page.navigate(url, self.config.timeout()).await?;
        debug!(url, "DOM content loaded");

        let script = self.fields.extraction_script();
        let value = page.evaluate(&script).await?;
        let document = self.fields.decode(value, Utc::now())?;

        if let Err(e) = page.close().await {
            debug!("Failed to close page: {}", e);
        }

        Ok(document)
    }
}

#[async_trait]
impl<E: RenderEngine> Extractor for BrowserExtractor<E> {
    fn name(&self) -> &'static str {
        "chrome"
    }

    async fn extract(&self, request: &ScrapeRequest) -> Result<ScrapedDocument> {
        let mut session = self.engine.launch(&self.config).await?;

        let outcome = self.scrape_page(&mut session, request.url()).await;

        if let Err(e) = session.close().await {
            warn!("Failed to close browser session: {}", e);
        }

        if let Ok(ref document) = outcome {
            info!(
                url = %document.url,
                links = document.links.len(),
                paragraphs = document.paragraphs.len(),
                "Extracted page fields"
            );
        }

        outcome
    }
}

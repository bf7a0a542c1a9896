//! Page extraction and result persistence.
//!
//! # Architecture
//!
//! ```text
//! ScrapeRequest → Extractor → ScrapedDocument | SnapError → ScrapeArtifact → ArtifactStore
//! ```
//!
//! Two extractors produce the same document shape:
//!
//! - [`BrowserExtractor`]: renders the page in headless Chrome
//!   ([`ChromeEngine`]) with images, fonts and stylesheets blocked, then
//!   evaluates the extraction script once DOM content has loaded.
//! - [`StaticExtractor`]: fetches the raw HTML and parses it without running
//!   scripts.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pagesnap::scraper::{self, BrowserExtractor, ChromeEngine, ScraperConfig};
//! use pagesnap::store::FileStore;
//!
//! let extractor = BrowserExtractor::new(ChromeEngine, ScraperConfig::default());
//! let store = FileStore::new("scraped_data.json");
//! let request = ScrapeRequest::new("https://example.com")?;
//!
//! // Persists a success or failure envelope either way
//! let document = scraper::run(&extractor, &store, &request).await?;
//! ```

mod browser;
mod chrome;
mod config;
mod extractor;
mod filter;
mod session;
mod static_html;

pub use browser::BrowserExtractor;
pub use chrome::{ChromeEngine, ChromePage, ChromeSession};
pub use config::{EngineKind, ScraperConfig};
pub use extractor::FieldExtractor;
pub use filter::{FilterDecision, ResourceFilter, ResourceKind};
pub use session::{RenderEngine, RenderPage, RenderSession, Viewport};
pub use static_html::{parse_document, StaticExtractor};

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::app::Result;
use crate::domain::{ScrapeArtifact, ScrapeRequest, ScrapedDocument};
use crate::store::ArtifactStore;

/// Trait for page extraction strategies
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Load one page and extract its fields
    async fn extract(&self, request: &ScrapeRequest) -> Result<ScrapedDocument>;
}

/// Run one extraction and persist its outcome.
///
/// The artifact written always matches the returned result: a success
/// envelope for `Ok`, a failure envelope for `Err`. A failed scrape is still
/// returned as `Err` after its envelope has been written.
pub async fn run<E, S>(extractor: &E, store: &S, request: &ScrapeRequest) -> Result<ScrapedDocument>
where
    E: Extractor + ?Sized,
    S: ArtifactStore + ?Sized,
{
    info!(url = request.url(), extractor = extractor.name(), "Starting scrape");

    let outcome = extractor.extract(request).await;
    let artifact = ScrapeArtifact::from_outcome(request.url(), &outcome);

    match outcome {
        Ok(document) => {
            store.write(&artifact)?;
            info!(
                location = %store.location(),
                scraped_at = %artifact.scraped_at(),
                "Scrape saved"
            );
            Ok(document)
        }
        Err(e) => {
            error!("Scrape of {} failed: {}", request.url(), e);
            match store.write(&artifact) {
                Ok(()) => warn!(
                    location = %store.location(),
                    scraped_at = %artifact.scraped_at(),
                    "Failure details saved"
                ),
                Err(write_err) => error!("Failed to save failure details: {}", write_err),
            }
            Err(e)
        }
    }
}

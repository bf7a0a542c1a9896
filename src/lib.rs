//! # pagesnap
//!
//! Capture a structured snapshot of one web page and serve it over HTTP.
//!
//! ## Architecture
//!
//! ```text
//! URL → Extractor → ScrapeArtifact → FileStore → Server
//! ```
//!
//! - [`scraper`]: renders the page in headless Chrome (or parses raw HTML)
//!   and extracts title, heading, meta description, links and paragraphs
//! - [`store`]: the single JSON artifact, replaced atomically on every run
//! - [`server`]: read-only JSON and HTML views of the artifact
//!
//! ## Quick Start
//!
//! ```bash
//! # Scrape a page
//! pagesnap scrape https://example.com
//!
//! # Or take the URL from the environment
//! SCRAPE_URL=https://example.com pagesnap scrape
//!
//! # Serve the result on :5000
//! pagesnap serve
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires configuration to the
/// artifact store and picks the extractor for a run.
pub mod app;

/// Command-line interface using clap.
///
/// - `scrape [URL]` - Scrape one page (URL falls back to `SCRAPE_URL`)
/// - `serve` - Serve the latest artifact
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/pagesnap/config.toml`, with environment overrides
/// for the artifact path and server address.
pub mod config;

/// Core domain models.
///
/// - [`ScrapeRequest`](domain::ScrapeRequest): a validated target URL
/// - [`ScrapedDocument`](domain::ScrapedDocument): the extracted fields
/// - [`ScrapeArtifact`](domain::ScrapeArtifact): success or failure envelope
pub mod domain;

/// Plain HTTP fetching for the static extractor.
pub mod fetcher;

/// Page extraction.
///
/// - [`Extractor`](scraper::Extractor): Async trait for extraction strategies
/// - [`BrowserExtractor`](scraper::BrowserExtractor): rendered extraction over a [`RenderEngine`](scraper::RenderEngine)
/// - [`StaticExtractor`](scraper::StaticExtractor): HTML-only extraction
/// - [`run`](scraper::run): extract and persist the outcome
pub mod scraper;

/// HTTP server for the artifact (`GET /`, `GET /ui`).
pub mod server;

/// Artifact persistence.
///
/// - [`ArtifactStore`](store::ArtifactStore): Trait for the artifact location
/// - [`FileStore`](store::FileStore): JSON file with atomic replacement
pub mod store;

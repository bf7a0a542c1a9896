//! Fallback extractor: plain HTTP GET plus static markup parsing.
//!
//! No scripts run and no DOM is built beyond the parsed markup, so pages that
//! render their content with JavaScript yield whatever the server sent.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ::scraper::{ElementRef, Html, Selector};
use tracing::info;
use url::Url;

use crate::app::{Result, SnapError};
use crate::domain::{Link, ScrapeRequest, ScrapedDocument};
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::scraper::config::ScraperConfig;
use crate::scraper::Extractor;

pub struct StaticExtractor<F: Fetcher = HttpFetcher> {
    fetcher: F,
    config: ScraperConfig,
}

impl StaticExtractor<HttpFetcher> {
    pub fn new(config: ScraperConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::with_fetcher(fetcher, config))
    }
}

impl<F: Fetcher> StaticExtractor<F> {
    pub fn with_fetcher(fetcher: F, config: ScraperConfig) -> Self {
        Self { fetcher, config }
    }
}

#[async_trait]
impl<F: Fetcher> Extractor for StaticExtractor<F> {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn extract(&self, request: &ScrapeRequest) -> Result<ScrapedDocument> {
        let page = self.fetcher.fetch(request.url()).await?;
        let base = Url::parse(&page.final_url)?;

        let document = parse_document(
            &page.body,
            &base,
            self.config.max_links,
            self.config.max_paragraphs,
            Utc::now(),
        )?;

        info!(
            url = %document.url,
            links = document.links.len(),
            paragraphs = document.paragraphs.len(),
            "Parsed page fields"
        );

        Ok(document)
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| SnapError::Extraction(format!("Invalid selector '{}': {:?}", css, e)))
}

/// Text content with runs of whitespace collapsed, approximating `innerText`
fn visible_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract the document fields from raw HTML served at `url`
pub fn parse_document(
    html: &str,
    url: &Url,
    max_links: usize,
    max_paragraphs: usize,
    captured_at: DateTime<Utc>,
) -> Result<ScrapedDocument> {
    let document = Html::parse_document(html);

    // A <base href> changes what relative links resolve against
    let base = document
        .select(&selector("base[href]")?)
        .next()
        .and_then(|el| el.value().attr("href"))
        .and_then(|href| url.join(href).ok())
        .unwrap_or_else(|| url.clone());

    let title = document
        .select(&selector("title")?)
        .next()
        .map(visible_text);

    let heading = document
        .select(&selector("h1, h2, h3, h4, h5, h6")?)
        .next()
        .map(visible_text);

    let meta_description = document
        .select(&selector("meta[name]")?)
        .find(|el| {
            el.value()
                .attr("name")
                .is_some_and(|name| name.trim().eq_ignore_ascii_case("description"))
        })
        .and_then(|el| el.value().attr("content"))
        .map(str::to_string);

    let links = document
        .select(&selector("a")?)
        .take(max_links)
        .map(|a| {
            let href = a
                .value()
                .attr("href")
                .map(|raw| {
                    base.join(raw.trim())
                        .map(|resolved| resolved.to_string())
                        .unwrap_or_else(|_| raw.to_string())
                })
                .unwrap_or_default();
            Link::new(visible_text(a), href)
        })
        .collect();

    let paragraphs = document
        .select(&selector("p")?)
        .take(max_paragraphs)
        .map(visible_text)
        .collect();

    let parsed = ScrapedDocument {
        title,
        url: url.to_string(),
        heading,
        meta_description,
        links,
        paragraphs,
        timestamp: captured_at,
    };

    Ok(parsed.normalized(max_links, max_paragraphs))
}

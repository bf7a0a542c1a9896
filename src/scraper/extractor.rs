use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::app::{Result, SnapError};
use crate::domain::document::{MAX_LINKS, MAX_PARAGRAPHS};
use crate::domain::{Link, ScrapedDocument};
use crate::scraper::ScraperConfig;

/// Builds the in-page extraction script and decodes what it returns
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    max_links: usize,
    max_paragraphs: usize,
}

/// Shape of the object returned by [`FieldExtractor::extraction_script`]
#[derive(Debug, Deserialize)]
struct RawFields {
    title: Option<String>,
    url: String,
    heading: Option<String>,
    #[serde(rename = "metaDescription")]
    meta_description: Option<String>,
    #[serde(default)]
    links: Vec<Link>,
    #[serde(default)]
    paragraphs: Vec<String>,
}

impl FieldExtractor {
    /// Limits above the document caps are lowered to them
    pub fn new(config: &ScraperConfig) -> Self {
        Self {
            max_links: config.max_links.min(MAX_LINKS),
            max_paragraphs: config.max_paragraphs.min(MAX_PARAGRAPHS),
        }
    }

    /// Generate JavaScript that reads the extracted fields from the loaded page
    ///
    /// Runs once in the browser context and returns a plain object:
    /// title, final URL, first heading, meta description, the first
    /// `max_links` anchors and the first `max_paragraphs` paragraphs.
    pub fn extraction_script(&self) -> String {
        let max_links = self.max_links;
        let max_paragraphs = self.max_paragraphs;

        format!(
            r#"
            (() => {{
                const text = (el) => (el.innerText || el.textContent || '').trim();

                const heading = document.querySelector('h1, h2, h3, h4, h5, h6');

                const meta = Array.from(document.querySelectorAll('meta[name]'))
                    .find(m => (m.getAttribute('name') || '').toLowerCase() === 'description');

                const links = Array.from(document.querySelectorAll('a'))
                    .slice(0, {max_links})
                    .map(a => ({{
                        text: text(a),
                        href: typeof a.href === 'string' ? a.href : (a.getAttribute('href') || '')
                    }}));

                const paragraphs = Array.from(document.querySelectorAll('p'))
                    .slice(0, {max_paragraphs})
                    .map(p => text(p));

                return {{
                    title: document.title || null,
                    url: window.location.href,
                    heading: heading ? text(heading) : null,
                    metaDescription: meta ? meta.getAttribute('content') : null,
                    links: links,
                    paragraphs: paragraphs
                }};
            }})()
            "#
        )
    }

    /// Turn the script's return value into a document captured at `captured_at`
    pub fn decode(
        &self,
        value: serde_json::Value,
        captured_at: DateTime<Utc>,
    ) -> Result<ScrapedDocument> {
        let raw: RawFields = serde_json::from_value(value)
            .map_err(|e| SnapError::Extraction(format!("Unexpected script result: {}", e)))?;

        let document = ScrapedDocument {
            title: raw.title,
            url: raw.url,
            heading: raw.heading,
            meta_description: raw.meta_description,
            links: raw.links,
            paragraphs: raw.paragraphs,
            timestamp: captured_at,
        };

        Ok(document.normalized(self.max_links, self.max_paragraphs))
    }
}

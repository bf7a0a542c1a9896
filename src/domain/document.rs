use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default cap on the number of links kept from a page.
pub const MAX_LINKS: usize = 20;

/// Default cap on the number of paragraphs kept from a page.
pub const MAX_PARAGRAPHS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub text: String,
    pub href: String,
}

impl Link {
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: href.into(),
        }
    }

    /// Text to show for the link, falling back to the href when blank
    pub fn display_text(&self) -> &str {
        if self.text.is_empty() {
            &self.href
        } else {
            &self.text
        }
    }
}

/// Fields extracted from one rendered (or statically parsed) page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapedDocument {
    pub title: Option<String>,
    pub url: String,
    pub heading: Option<String>,
    #[serde(rename = "metaDescription")]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub paragraphs: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl ScrapedDocument {
    /// Apply the document-level policies to freshly extracted fields:
    /// an empty title is absent, and both sequences are capped.
    ///
    /// Limits above [`MAX_LINKS`] / [`MAX_PARAGRAPHS`] are lowered to them.
    pub fn normalized(mut self, max_links: usize, max_paragraphs: usize) -> Self {
        self.title = self
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        self.links.truncate(max_links.min(MAX_LINKS));
        self.paragraphs.truncate(max_paragraphs.min(MAX_PARAGRAPHS));
        self
    }
}

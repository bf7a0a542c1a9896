use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{redirect, Client};
use tracing::debug;

use crate::app::Result;
use crate::fetcher::{FetchedPage, Fetcher};
use crate::scraper::ScraperConfig;

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let mut builder = Client::builder()
            .timeout(config.http_timeout())
            .gzip(true)
            .brotli(true)
            .redirect(redirect::Policy::limited(10))
            .default_headers(headers);

        if let Some(ref ua) = config.user_agent {
            builder = builder.user_agent(ua.clone());
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let response = self.client.get(url).send().await?;

        response.error_for_status_ref()?;

        let final_url = response.url().to_string();
        debug!(url, final_url = %final_url, status = %response.status(), "Fetched page");

        let body = response.text().await?;

        Ok(FetchedPage { final_url, body })
    }
}

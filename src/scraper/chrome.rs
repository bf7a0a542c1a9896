use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::fetch::{
    ContinueRequestParams, EnableParams, EventRequestPaused, FailRequestParams, RequestPattern,
    RequestStage,
};
use chromiumoxide::cdp::browser_protocol::network::{ErrorReason, ResourceType};
use chromiumoxide::cdp::browser_protocol::page::{EventDomContentEventFired, NavigateParams};
use chromiumoxide::handler::viewport::Viewport as BrowserViewport;
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::app::{Result, SnapError};
use crate::scraper::config::ScraperConfig;
use crate::scraper::filter::{FilterDecision, ResourceFilter, ResourceKind};
use crate::scraper::session::{RenderEngine, RenderPage, RenderSession, Viewport};

impl From<&ResourceType> for ResourceKind {
    fn from(resource_type: &ResourceType) -> Self {
        match resource_type {
            ResourceType::Document => ResourceKind::Document,
            ResourceType::Stylesheet => ResourceKind::Stylesheet,
            ResourceType::Image => ResourceKind::Image,
            ResourceType::Media => ResourceKind::Media,
            ResourceType::Font => ResourceKind::Font,
            ResourceType::Script => ResourceKind::Script,
            ResourceType::Xhr => ResourceKind::Xhr,
            ResourceType::Fetch => ResourceKind::Fetch,
            _ => ResourceKind::Other,
        }
    }
}

/// Headless Chrome engine driven over CDP by chromiumoxide
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeEngine;

#[async_trait]
impl RenderEngine for ChromeEngine {
    type Session = ChromeSession;

    async fn launch(&self, config: &ScraperConfig) -> Result<ChromeSession> {
        let mut builder = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-software-rasterizer")
            .viewport(None::<BrowserViewport>)
            .request_timeout(config.timeout());

        if !config.headless {
            builder = builder.with_head();
        }

        if let Some(ref path) = config.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        let browser_config = builder
            .build()
            .map_err(|e| SnapError::Launch(format!("Failed to build browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
            SnapError::Launch(format!(
                "{}. Is Chrome or Chromium installed and in PATH?",
                e
            ))
        })?;

        // Spawn the browser handler
        let handler = tokio::spawn(async move {
            while let Some(_event) = handler.next().await {
                // Handle browser events
            }
        });

        debug!("Browser launched");

        Ok(ChromeSession {
            browser,
            handler,
            user_agent: config.user_agent.clone(),
        })
    }
}

/// One browser process and the task pumping its CDP connection
pub struct ChromeSession {
    browser: Browser,
    handler: JoinHandle<()>,
    user_agent: Option<String>,
}

#[async_trait]
impl RenderSession for ChromeSession {
    type Page = ChromePage;

    async fn open_page(&mut self, viewport: Viewport) -> Result<ChromePage> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| SnapError::Session(format!("Failed to create page: {}", e)))?;

        page.execute(SetDeviceMetricsOverrideParams::new(
            i64::from(viewport.width),
            i64::from(viewport.height),
            1.0,
            false,
        ))
        .await
        .map_err(|e| SnapError::Session(format!("Failed to set viewport: {}", e)))?;

        // Set user agent if configured
        if let Some(ref ua) = self.user_agent {
            page.set_user_agent(ua)
                .await
                .map_err(|e| SnapError::Session(format!("Failed to set user agent: {}", e)))?;
        }

        Ok(ChromePage {
            page,
            filter_task: None,
            stats: Arc::default(),
        })
    }

    async fn close(&mut self) -> Result<()> {
        let closed = self.browser.close().await;
        if closed.is_ok() {
            if let Err(e) = self.browser.wait().await {
                debug!("Failed to wait for browser exit: {}", e);
            }
        }
        self.handler.abort();

        closed
            .map(|_| ())
            .map_err(|e| SnapError::Session(format!("Failed to close browser: {}", e)))
    }
}

#[derive(Debug, Default)]
struct FilterStats {
    allowed: AtomicUsize,
    aborted: AtomicUsize,
}

pub struct ChromePage {
    page: Page,
    filter_task: Option<JoinHandle<()>>,
    stats: Arc<FilterStats>,
}

#[async_trait]
impl RenderPage for ChromePage {
    async fn set_request_filter(&mut self, filter: ResourceFilter) -> Result<()> {
        let mut paused = self
            .page
            .event_listener::<EventRequestPaused>()
            .await
            .map_err(|e| SnapError::Session(format!("Failed to listen for requests: {}", e)))?;

        let pattern = RequestPattern::builder()
            .url_pattern("*")
            .request_stage(RequestStage::Request)
            .build();
        self.page
            .execute(EnableParams::builder().patterns(vec![pattern]).build())
            .await
            .map_err(|e| SnapError::Session(format!("Failed to enable request interception: {}", e)))?;
        debug!(blocked = ?filter.blocked(), "Request interception enabled");

        let page = self.page.clone();
        let stats = self.stats.clone();

        let task = tokio::spawn(async move {
            while let Some(event) = paused.next().await {
                let kind = ResourceKind::from(&event.resource_type);
                let outcome = match filter.decide(kind) {
                    FilterDecision::Abort => {
                        stats.aborted.fetch_add(1, Ordering::Relaxed);
                        page.execute(FailRequestParams::new(
                            event.request_id.clone(),
                            ErrorReason::BlockedByClient,
                        ))
                        .await
                        .map(|_| ())
                    }
                    FilterDecision::Allow => {
                        stats.allowed.fetch_add(1, Ordering::Relaxed);
                        page.execute(ContinueRequestParams::new(event.request_id.clone()))
                            .await
                            .map(|_| ())
                    }
                };

                if let Err(e) = outcome {
                    debug!(kind = kind.as_str(), "Failed to resolve paused request: {}", e);
                }
            }
        });

        self.filter_task = Some(task);
        Ok(())
    }

    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<()> {
        let mut dom_ready = self
            .page
            .event_listener::<EventDomContentEventFired>()
            .await
            .map_err(|e| SnapError::Session(format!("Failed to listen for page events: {}", e)))?;

        let page = &self.page;
        let load = async move {
            let response = page
                .execute(NavigateParams::new(url))
                .await
                .map_err(|e| SnapError::Navigation {
                    url: url.to_string(),
                    reason: e.to_string(),
                })?;

            // DNS, TLS and connection failures come back as error text
            if let Some(reason) = response.result.error_text.clone() {
                return Err(SnapError::Navigation {
                    url: url.to_string(),
                    reason,
                });
            }

            match dom_ready.next().await {
                Some(_) => Ok(()),
                None => Err(SnapError::Session(
                    "Page closed before DOM content loaded".to_string(),
                )),
            }
        };

        match tokio::time::timeout(timeout, load).await {
            Ok(result) => result,
            Err(_) => Err(SnapError::NavigationTimeout {
                url: url.to_string(),
                secs: timeout.as_secs(),
            }),
        }
    }

    async fn evaluate(&mut self, script: &str) -> Result<serde_json::Value> {
        let value: serde_json::Value = self
            .page
            .evaluate(script.to_string())
            .await
            .map_err(|e| SnapError::Extraction(format!("Script execution failed: {}", e)))?
            .into_value()
            .map_err(|e| SnapError::Extraction(format!("Failed to parse result: {:?}", e)))?;

        Ok(value)
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(task) = self.filter_task.take() {
            task.abort();
        }

        debug!(
            allowed = self.stats.allowed.load(Ordering::Relaxed),
            aborted = self.stats.aborted.load(Ordering::Relaxed),
            "Request filter summary"
        );

        self.page
            .clone()
            .close()
            .await
            .map_err(|e| SnapError::Session(format!("Failed to close page: {}", e)))
    }
}

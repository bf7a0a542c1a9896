//! Read-only HTTP view of the artifact.
//!
//! The server holds no state between requests: every request re-reads the
//! artifact, so a scrape that finishes while the server runs is visible on
//! the next request.

mod routes;
mod view;

pub use routes::{load_snapshot, Placeholder, Snapshot};
pub use view::render_page;

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::app::{Result, SnapError};
use crate::config::ServerConfig;
use crate::store::ArtifactStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ArtifactStore>,
}

pub fn create_router(store: Arc<dyn ArtifactStore>) -> Router {
    Router::new()
        .route("/", get(routes::artifact_json))
        .route("/ui", get(routes::artifact_ui))
        .with_state(AppState { store })
}

/// Bind `config.host:config.port` and serve until the process is stopped.
pub async fn serve(config: &ServerConfig, store: Arc<dyn ArtifactStore>) -> Result<()> {
    if matches!(store.read_raw(), Ok(None)) {
        warn!(
            location = %store.location(),
            "Scraped data file not found. Run the scraper first using 'pagesnap scrape [URL]'"
        );
    }

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| SnapError::Other(format!("Failed to bind {}: {}", addr, e)))?;

    info!("Serving scraped data on http://{}", addr);

    axum::serve(listener, create_router(store)).await?;
    Ok(())
}

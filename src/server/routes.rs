use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn};

use crate::server::view;
use crate::server::AppState;

/// Stands in for the artifact when there is nothing valid to serve.
#[derive(Debug, Serialize)]
pub struct Placeholder {
    pub error: &'static str,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Placeholder {
    fn new(error: &'static str, message: impl Into<String>) -> Self {
        Self {
            error,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    fn to_value(&self) -> Value {
        serde_json::json!({
            "error": self.error,
            "message": self.message,
            "timestamp": self.timestamp,
        })
    }
}

/// What a request sees of the artifact at the moment it is read
pub enum Snapshot {
    Stored { raw: String, value: Value },
    Missing(Placeholder),
}

impl Snapshot {
    fn value(&self) -> Value {
        match self {
            Snapshot::Stored { value, .. } => value.clone(),
            Snapshot::Missing(placeholder) => placeholder.to_value(),
        }
    }
}

/// Read the artifact fresh. Never fails; problems become placeholders.
pub fn load_snapshot(state: &AppState) -> Snapshot {
    let raw = match state.store.read_raw() {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            warn!(location = %state.store.location(), "Scraped data file not found");
            return Snapshot::Missing(Placeholder::new(
                "No scraped data available",
                "Run the scraper first using 'pagesnap scrape [URL]'",
            ));
        }
        Err(e) => {
            error!("Unexpected error reading scraped data: {}", e);
            return Snapshot::Missing(Placeholder::new("Failed to read scraped data", e.to_string()));
        }
    };

    match serde_json::from_str::<Value>(&raw) {
        Ok(value) => Snapshot::Stored { raw, value },
        Err(e) => {
            error!("Error decoding JSON from scraped data file: {}", e);
            Snapshot::Missing(Placeholder::new("Invalid scraped data", e.to_string()))
        }
    }
}

/// `GET /`: the artifact exactly as stored, or a placeholder
pub async fn artifact_json(State(state): State<AppState>) -> Response {
    match load_snapshot(&state) {
        Snapshot::Stored { raw, .. } => {
            ([(header::CONTENT_TYPE, "application/json")], raw).into_response()
        }
        Snapshot::Missing(placeholder) => Json(placeholder).into_response(),
    }
}

/// `GET /ui`
pub async fn artifact_ui(State(state): State<AppState>) -> Html<String> {
    let snapshot = load_snapshot(&state);
    Html(view::render_page(&snapshot.value()))
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app::SnapError;
use crate::domain::ScrapedDocument;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorDetails {
    pub message: String,
    pub stack: String,
}

impl From<&SnapError> for ErrorDetails {
    fn from(err: &SnapError) -> Self {
        Self {
            message: err.to_string(),
            stack: err.trace(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuccessEnvelope {
    pub source_url: String,
    pub scraped_at: DateTime<Utc>,
    pub data: ScrapedDocument,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FailureEnvelope {
    pub source_url: String,
    pub scraped_at: DateTime<Utc>,
    pub error: ErrorDetails,
}

/// The persisted outcome of one run.
///
/// Serialized without a tag: the presence of `data` or `error` is what
/// distinguishes the two shapes, and a document carrying both is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScrapeArtifact {
    Success(SuccessEnvelope),
    Failure(FailureEnvelope),
}

impl ScrapeArtifact {
    pub fn success(source_url: impl Into<String>, data: ScrapedDocument) -> Self {
        Self::Success(SuccessEnvelope {
            source_url: source_url.into(),
            scraped_at: Utc::now(),
            data,
        })
    }

    pub fn failure(source_url: impl Into<String>, err: &SnapError) -> Self {
        Self::Failure(FailureEnvelope {
            source_url: source_url.into(),
            scraped_at: Utc::now(),
            error: ErrorDetails::from(err),
        })
    }

    /// Build the envelope matching a run's outcome.
    pub fn from_outcome(
        source_url: &str,
        outcome: &std::result::Result<ScrapedDocument, SnapError>,
    ) -> Self {
        match outcome {
            Ok(document) => Self::success(source_url, document.clone()),
            Err(err) => Self::failure(source_url, err),
        }
    }

    pub fn source_url(&self) -> &str {
        match self {
            Self::Success(s) => &s.source_url,
            Self::Failure(f) => &f.source_url,
        }
    }

    pub fn scraped_at(&self) -> DateTime<Utc> {
        match self {
            Self::Success(s) => s.scraped_at,
            Self::Failure(f) => f.scraped_at,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

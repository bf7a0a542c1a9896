pub mod artifact;
pub mod document;
pub mod request;

pub use artifact::{ErrorDetails, FailureEnvelope, ScrapeArtifact, SuccessEnvelope};
pub use document::{Link, ScrapedDocument};
pub use request::ScrapeRequest;

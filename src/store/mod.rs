pub mod file;

use crate::app::Result;
use crate::domain::ScrapeArtifact;

pub use file::FileStore;

/// The single well-known artifact location shared by the scraper and server.
pub trait ArtifactStore: Send + Sync {
    /// Replace the stored artifact. Readers see the old or the new document, never a mix.
    fn write(&self, artifact: &ScrapeArtifact) -> Result<()>;

    /// Stored JSON text, `None` when nothing has been written yet
    fn read_raw(&self) -> Result<Option<String>>;

    /// Stored artifact, validated against the envelope schema
    fn read(&self) -> Result<Option<ScrapeArtifact>> {
        match self.read_raw()? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Human-readable location for logs
    fn location(&self) -> String;
}

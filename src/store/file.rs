use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::app::Result;
use crate::domain::ScrapeArtifact;
use crate::store::ArtifactStore;

/// Artifact stored as one pretty-printed JSON file.
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the target, so the file at `path` is always a complete document.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Mode for the replacement file: the current artifact's, or 0644 for a new one
    #[cfg(unix)]
    fn target_permissions(&self) -> fs::Permissions {
        use std::os::unix::fs::PermissionsExt;

        fs::metadata(&self.path)
            .map(|meta| meta.permissions())
            .unwrap_or_else(|_| fs::Permissions::from_mode(0o644))
    }
}

impl ArtifactStore for FileStore {
    fn write(&self, artifact: &ScrapeArtifact) -> Result<()> {
        let mut json = serde_json::to_string_pretty(artifact)?;
        json.push('\n');

        let dir = self.parent_dir();
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        // Temp files are created 0600, the server may run as another user
        #[cfg(unix)]
        tmp.as_file().set_permissions(self.target_permissions())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!(path = %self.path.display(), bytes = json.len(), "Artifact written");
        Ok(())
    }

    fn read_raw(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SnapError;
    use crate::domain::{Link, ScrapedDocument};
    use chrono::Utc;

    fn success(url: &str) -> ScrapeArtifact {
        ScrapeArtifact::success(
            url,
            ScrapedDocument {
                title: Some("Title".into()),
                url: format!("{url}/"),
                heading: None,
                meta_description: Some("desc".into()),
                links: vec![Link::new("a", "https://a.test/")],
                paragraphs: vec!["p".into()],
                timestamp: Utc::now(),
            },
        )
    }

    #[test]
    fn test_read_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("scraped_data.json"));
        assert!(store.read_raw().unwrap().is_none());
        assert!(store.read().unwrap().is_none());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("scraped_data.json"));
        let artifact = success("https://a.test");

        store.write(&artifact).unwrap();
        assert_eq!(store.read().unwrap(), Some(artifact));
    }

    #[test]
    fn test_output_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("scraped_data.json"));
        store.write(&success("https://a.test")).unwrap();

        let raw = store.read_raw().unwrap().unwrap();
        assert!(raw.starts_with("{\n  \"source_url\""));
        assert!(raw.ends_with("}\n"));
    }

    #[test]
    fn test_overwrite_leaves_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("scraped_data.json"));

        store.write(&success("https://first.test")).unwrap();
        let err = SnapError::Other("boom".into());
        store
            .write(&ScrapeArtifact::failure("https://second.test", &err))
            .unwrap();

        let artifact = store.read().unwrap().unwrap();
        assert_eq!(artifact.source_url(), "https://second.test");
        assert!(!artifact.is_success());

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested/out/scraped_data.json"));
        store.write(&success("https://a.test")).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_read_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scraped_data.json");
        fs::write(&path, "{ not json").unwrap();

        let store = FileStore::new(&path);
        assert!(store.read_raw().unwrap().is_some());
        assert!(matches!(store.read(), Err(SnapError::Json(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_new_artifact_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("scraped_data.json"));
        let err = SnapError::Other("boom".into());
        store
            .write(&ScrapeArtifact::failure("https://a.test", &err))
            .unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn test_overwrite_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("scraped_data.json"));
        store.write(&success("https://first.test")).unwrap();
        fs::set_permissions(store.path(), fs::Permissions::from_mode(0o640)).unwrap();

        store.write(&success("https://second.test")).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[test]
    fn test_bare_file_name_writes_to_current_dir_parent() {
        let store = FileStore::new("scraped_data.json");
        assert_eq!(store.parent_dir(), Path::new("."));
    }
}

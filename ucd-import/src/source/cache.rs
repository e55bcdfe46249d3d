//! On-disk cache for the downloaded archive and the extracted XML
//!
//! Files live under `<cache_dir>/<version>/`, so switching the configured UCD
//! version never picks up another version's data. A cached file is used only
//! if it is non-empty and, when a maximum age is configured, not older than
//! that age. Write failures are logged and otherwise ignored.

use crate::source::fetch::{ARCHIVE_NAME, XML_ENTRY};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct ArtifactCache {
    dir: PathBuf,
    max_age: Option<Duration>,
}

impl ArtifactCache {
    pub fn new(cache_root: &Path, version: &str, max_age: Option<Duration>) -> Self {
        Self {
            dir: cache_root.join(version),
            max_age,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn xml_path(&self) -> PathBuf {
        self.dir.join(XML_ENTRY)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.dir.join(ARCHIVE_NAME)
    }

    /// Whether the file at `path` may be served from cache
    pub fn is_valid(&self, path: &Path) -> bool {
        let metadata = match std::fs::metadata(path) {
            Ok(metadata) if metadata.is_file() => metadata,
            _ => return false,
        };
        if metadata.len() == 0 {
            debug!("Ignoring empty cache file {}", path.display());
            return false;
        }

        match (self.max_age, metadata.modified()) {
            (Some(max_age), Ok(modified)) => {
                let age = SystemTime::now()
                    .duration_since(modified)
                    .unwrap_or(Duration::ZERO);
                if age > max_age {
                    debug!(
                        age_secs = age.as_secs(),
                        "Cache file {} expired",
                        path.display()
                    );
                    return false;
                }
                true
            }
            // Age limit configured but the platform reports no mtime
            (Some(_), Err(_)) => false,
            (None, _) => true,
        }
    }

    pub async fn read_xml(&self) -> Option<Vec<u8>> {
        self.read(&self.xml_path()).await
    }

    pub async fn read_archive(&self) -> Option<Vec<u8>> {
        self.read(&self.archive_path()).await
    }

    pub async fn store_xml(&self, bytes: &[u8]) {
        self.store(&self.xml_path(), bytes).await
    }

    pub async fn store_archive(&self, bytes: &[u8]) {
        self.store(&self.archive_path(), bytes).await
    }

    async fn read(&self, path: &Path) -> Option<Vec<u8>> {
        if !self.is_valid(path) {
            return None;
        }
        match tokio::fs::read(path).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!("Failed to read cache file {}: {}", path.display(), e);
                None
            }
        }
    }

    async fn store(&self, path: &Path, bytes: &[u8]) {
        if let Err(e) = tokio::fs::create_dir_all(&self.dir).await {
            warn!("Failed to create cache directory {}: {}", self.dir.display(), e);
            return;
        }
        match tokio::fs::write(path, bytes).await {
            Ok(()) => info!("Cached {}", path.display()),
            Err(e) => warn!("Failed to write cache file {}: {}", path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_store_then_read() {
        let dir = TempDir::new().unwrap();
        let cache = ArtifactCache::new(dir.path(), "16.0.0", None);

        assert!(cache.read_xml().await.is_none());
        cache.store_xml(b"<ucd/>").await;

        assert_eq!(cache.read_xml().await.unwrap(), b"<ucd/>");
        assert!(cache.xml_path().starts_with(dir.path().join("16.0.0")));
    }

    #[tokio::test]
    async fn test_empty_file_is_invalid() {
        let dir = TempDir::new().unwrap();
        let cache = ArtifactCache::new(dir.path(), "16.0.0", None);
        cache.store_archive(b"").await;

        assert!(cache.archive_path().exists());
        assert!(!cache.is_valid(&cache.archive_path()));
        assert!(cache.read_archive().await.is_none());
    }

    #[tokio::test]
    async fn test_other_version_not_used() {
        let dir = TempDir::new().unwrap();
        ArtifactCache::new(dir.path(), "15.1.0", None)
            .store_xml(b"<ucd/>")
            .await;

        let cache = ArtifactCache::new(dir.path(), "16.0.0", None);
        assert!(cache.read_xml().await.is_none());
    }

    #[tokio::test]
    async fn test_max_age_expires_files() {
        let dir = TempDir::new().unwrap();
        let cache = ArtifactCache::new(dir.path(), "16.0.0", Some(Duration::ZERO));
        cache.store_xml(b"<ucd/>").await;
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(!cache.is_valid(&cache.xml_path()));

        let lenient = ArtifactCache::new(dir.path(), "16.0.0", Some(Duration::from_secs(3600)));
        assert!(lenient.is_valid(&lenient.xml_path()));
    }

    #[tokio::test]
    async fn test_write_failure_is_not_fatal() {
        let dir = TempDir::new().unwrap();
        // A regular file where the version directory should be
        std::fs::write(dir.path().join("16.0.0"), b"blocker").unwrap();

        let cache = ArtifactCache::new(dir.path(), "16.0.0", None);
        cache.store_xml(b"<ucd/>").await;
        assert!(cache.read_xml().await.is_none());
    }
}

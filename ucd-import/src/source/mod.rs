//! Source artifact: locate, fetch and decode the UCD XML
//!
//! Lookup order for the XML bytes: cached XML, cached archive, network. The
//! cache is skipped entirely when a refresh is requested.

pub mod attrs;
pub mod cache;
pub mod decode;
pub mod document;
pub mod fetch;

pub use cache::ArtifactCache;
pub use decode::decode;
pub use document::{Repertoire, SourceDocument};
pub use fetch::{archive_url, extract_xml, SourceClient, ARCHIVE_NAME, XML_ENTRY};

use crate::error::SourceError;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Where the XML comes from
#[derive(Debug, Clone)]
pub enum SourceLocation {
    /// Release directory under a web root, with local cache
    Remote {
        base_url: String,
        version: String,
        cache: ArtifactCache,
        refresh: bool,
    },
    /// Local `.xml` file or `.zip` archive
    File(PathBuf),
}

/// Obtain the UCD XML bytes
pub async fn load_xml(location: &SourceLocation) -> Result<Vec<u8>, SourceError> {
    match location {
        SourceLocation::File(path) => read_local(path).await,
        SourceLocation::Remote {
            base_url,
            version,
            cache,
            refresh,
        } => {
            if !refresh {
                if let Some(xml) = from_cache(cache).await {
                    return Ok(xml);
                }
            }
            fetch_remote(base_url, version, cache).await
        }
    }
}

impl SourceLocation {
    /// Archive URL a remote location downloads from
    pub fn archive_url(&self) -> Option<String> {
        match self {
            SourceLocation::Remote {
                base_url, version, ..
            } => Some(archive_url(base_url, version)),
            SourceLocation::File(_) => None,
        }
    }
}

/// Obtain and decode the source document
pub async fn load_document(location: &SourceLocation) -> Result<SourceDocument, SourceError> {
    let xml = load_xml(location).await?;
    decode(&xml)
}

async fn from_cache(cache: &ArtifactCache) -> Option<Vec<u8>> {
    if let Some(xml) = cache.read_xml().await {
        info!("Using cached XML: {}", cache.xml_path().display());
        return Some(xml);
    }

    let archive = cache.read_archive().await?;
    info!("Found cached archive, extracting XML...");
    match extract_xml(&archive) {
        Ok(xml) => {
            cache.store_xml(&xml).await;
            Some(xml)
        }
        Err(e) => {
            warn!("Failed to extract from cached archive: {}, downloading fresh copy", e);
            None
        }
    }
}

async fn fetch_remote(
    base_url: &str,
    version: &str,
    cache: &ArtifactCache,
) -> Result<Vec<u8>, SourceError> {
    let client = SourceClient::new(base_url, version)?;
    let archive = client.download_archive().await?;
    let xml = extract_xml(&archive)?;

    cache.store_archive(&archive).await;
    cache.store_xml(&xml).await;
    Ok(xml)
}

async fn read_local(path: &Path) -> Result<Vec<u8>, SourceError> {
    info!("Reading source file {}", path.display());
    let bytes = tokio::fs::read(path).await?;

    let is_zip = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
    if is_zip {
        extract_xml(&bytes)
    } else {
        Ok(bytes)
    }
}

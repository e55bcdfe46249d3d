//! Network fetch and archive extraction

use crate::error::SourceError;
use std::io::{Cursor, Read};
use std::time::Duration;
use tracing::{debug, info};
use zip::result::ZipError;
use zip::ZipArchive;

/// Published archive name under the versioned `ucdxml/` directory
pub const ARCHIVE_NAME: &str = "ucd.all.flat.zip";
/// XML entry inside the archive
pub const XML_ENTRY: &str = "ucd.all.flat.xml";

const USER_AGENT: &str = concat!("ucd-import/", env!("CARGO_PKG_VERSION"));
/// The flat archive is tens of megabytes
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// HTTP client for one release's `ucdxml` directory
pub struct SourceClient {
    http_client: reqwest::Client,
    base_url: String,
    version: String,
}

impl SourceClient {
    pub fn new(base_url: &str, version: &str) -> Result<Self, SourceError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(DOWNLOAD_TIMEOUT)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.to_string(),
            version: version.to_string(),
        })
    }

    /// Full URL of the flat archive
    pub fn archive_url(&self) -> String {
        archive_url(&self.base_url, &self.version)
    }

    /// Download the archive bytes; any status other than 200 is an error
    pub async fn download_archive(&self) -> Result<Vec<u8>, SourceError> {
        let url = self.archive_url();
        info!("Downloading {}", url);

        let response = self.http_client.get(&url).send().await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(SourceError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        info!(bytes = bytes.len(), "Download complete");
        Ok(bytes.to_vec())
    }
}

/// `<base_url>/<version>/ucdxml/ucd.all.flat.zip`
pub fn archive_url(base_url: &str, version: &str) -> String {
    format!(
        "{}/{}/ucdxml/{}",
        base_url.trim_end_matches('/'),
        version.trim_matches('/'),
        ARCHIVE_NAME
    )
}

/// Extract the UCD XML entry from archive bytes
pub fn extract_xml(archive: &[u8]) -> Result<Vec<u8>, SourceError> {
    let mut archive = ZipArchive::new(Cursor::new(archive))?;

    let mut entry = match archive.by_name(XML_ENTRY) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => {
            return Err(SourceError::MissingEntry {
                entry: XML_ENTRY.to_string(),
            })
        }
        Err(e) => return Err(e.into()),
    };

    let mut xml = Vec::with_capacity(entry.size() as usize);
    entry.read_to_end(&mut xml)?;
    debug!(bytes = xml.len(), "Extracted {}", XML_ENTRY);
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn zip_with(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_archive_url_joins_base() {
        let with_slash = SourceClient::new("https://www.unicode.org/Public/", "16.0.0").unwrap();
        let without = SourceClient::new("https://www.unicode.org/Public", "16.0.0").unwrap();
        assert_eq!(
            with_slash.archive_url(),
            "https://www.unicode.org/Public/16.0.0/ucdxml/ucd.all.flat.zip"
        );
        assert_eq!(with_slash.archive_url(), without.archive_url());
    }

    #[test]
    fn test_archive_url_follows_version() {
        assert_eq!(
            archive_url("http://mirror.local/Public/", "15.1.0"),
            "http://mirror.local/Public/15.1.0/ucdxml/ucd.all.flat.zip"
        );
    }

    #[test]
    fn test_extract_xml_entry() {
        let archive = zip_with(&[("README.txt", "readme"), (XML_ENTRY, "<ucd/>")]);
        assert_eq!(extract_xml(&archive).unwrap(), b"<ucd/>");
    }

    #[test]
    fn test_missing_entry() {
        let archive = zip_with(&[("ucd.nounihan.flat.xml", "<ucd/>")]);
        let err = extract_xml(&archive).unwrap_err();
        assert!(matches!(err, SourceError::MissingEntry { .. }));
    }

    #[test]
    fn test_not_an_archive() {
        let err = extract_xml(b"<html>404</html>").unwrap_err();
        assert!(matches!(err, SourceError::Archive(_)));
    }
}

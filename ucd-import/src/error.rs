//! Error types for ucd-import
//!
//! `SourceError` covers everything up to a decoded document and always
//! aborts the run before the store is touched. Store failures come through
//! as `ucd_common::Error`.

use thiserror::Error;

/// Failure obtaining or decoding the source artifact
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network or HTTP protocol failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with something other than 200
    #[error("Unexpected HTTP status {status} fetching {url}")]
    Status { url: String, status: u16 },

    /// ZIP container could not be read
    #[error("Invalid archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Archive does not contain the expected entry
    #[error("{entry} not found in archive")]
    MissingEntry { entry: String },

    /// Malformed XML
    #[error("XML syntax error at byte {position}: {source}")]
    Xml {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },

    /// Document parsed but is not a UCD XML file
    #[error("Not a UCD document: {0}")]
    NotUcd(String),

    /// Attribute value that cannot be decoded (e.g. a boolean other than Y/N)
    #[error("Invalid value {value:?} for attribute '{attribute}' on <{element}>")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
    },

    /// Local file I/O (cache or archive extraction)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SourceError {
    pub fn invalid_attribute(element: &str, attribute: &str, value: &str) -> Self {
        SourceError::InvalidAttribute {
            element: element.to_string(),
            attribute: attribute.to_string(),
            value: value.to_string(),
        }
    }
}

/// Top-level failure of an import run
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Store error: {0}")]
    Store(#[from] ucd_common::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ImportError>;

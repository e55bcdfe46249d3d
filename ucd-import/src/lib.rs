//! ucd-import library
//!
//! Fetches the UCD XML (UAX #42 flat format), decodes it, flattens and
//! validates the repertoire and replaces the store's `metadata`,
//! `code_points` and `blocks` collections with the result.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod source;
pub mod transform;

pub use config::{ImportArgs, ImportConfig};
pub use error::{ImportError, SourceError};
pub use pipeline::{persist, prepare, run, PipelineReport, PreparedImport};

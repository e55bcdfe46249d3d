//! # UCD Common Library
//!
//! Shared code for the UCD importer and query service:
//! - Code point, block and metadata document models
//! - Document store access (collections, indexes, replace-then-insert saves)
//! - Aggregate statistics and lookup queries
//! - Configuration loading
//! - Store error taxonomy

pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod time;

pub use db::{DatabaseStats, ScriptStat, Store};
pub use error::{Error, Result};
pub use model::{Block, Category, CodePoint, UcdMetadata};

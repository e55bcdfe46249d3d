//! Common error types for the UCD store

use std::time::Duration;
use thiserror::Error;

/// Common result type for UCD store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Store error taxonomy shared by the importer and the query service
#[derive(Error, Debug)]
pub enum Error {
    /// Raw database error (wraps sqlx::Error) before it is attributed to an operation
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Initial connection or ping failed; nothing has been mutated
    #[error("Failed to connect to store: {0}")]
    StoreConnection(#[source] sqlx::Error),

    /// A named drop/delete/insert/index/count/aggregate call failed
    #[error("Store operation '{operation}' failed: {source}")]
    StoreOperation {
        operation: String,
        #[source]
        source: sqlx::Error,
    },

    /// A code point batch failed; batches before `start` remain committed
    #[error("Failed to insert code points batch {start}-{end}: {source}")]
    BatchInsert {
        start: usize,
        end: usize,
        #[source]
        source: sqlx::Error,
    },

    /// Operation exceeded its bounded timeout
    #[error("Store operation '{operation}' timed out after {timeout:?}")]
    Timeout {
        operation: String,
        timeout: Duration,
    },

    /// Document (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Attribute a raw database error to the named store operation.
    ///
    /// Errors that already carry their own context pass through untouched.
    pub fn in_operation(self, operation: &str) -> Self {
        match self {
            Error::Database(source) => Error::StoreOperation {
                operation: operation.to_string(),
                source,
            },
            other => other,
        }
    }
}

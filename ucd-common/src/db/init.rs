//! Store connection
//!
//! Opening the store is bounded by the connect timeout and always ends with a
//! ping, so a dead or unreadable database fails here, before any mutation.

use crate::{Error, Result};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Open (creating if needed) the store database for writing
pub async fn connect(db_path: &Path, timeout: Duration) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = open_pool(&db_url, timeout).await?;

    if newly_created {
        info!("Initialized new store: {}", db_path.display());
    } else {
        info!("Opened existing store: {}", db_path.display());
    }

    // WAL lets the query service read while an import is writing
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await
        .map_err(Error::StoreConnection)?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await
        .map_err(Error::StoreConnection)?;

    Ok(pool)
}

/// Open an existing store read-only
pub async fn connect_readonly(db_path: &Path, timeout: Duration) -> Result<SqlitePool> {
    if !db_path.exists() {
        return Err(Error::NotFound(format!(
            "Store not found: {}. Run ucd-import first to populate it.",
            db_path.display()
        )));
    }

    let db_url = format!("sqlite://{}?mode=ro", db_path.display());
    open_pool(&db_url, timeout).await
}

async fn open_pool(db_url: &str, timeout: Duration) -> Result<SqlitePool> {
    debug!("Connecting to store: {}", db_url);

    let attempt = async {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(timeout)
            .connect(db_url)
            .await?;

        // Ping
        sqlx::query("SELECT 1").execute(&pool).await?;
        Ok::<_, sqlx::Error>(pool)
    };

    match tokio::time::timeout(timeout, attempt).await {
        Ok(Ok(pool)) => Ok(pool),
        Ok(Err(e)) => Err(Error::StoreConnection(e)),
        Err(_) => Err(Error::Timeout {
            operation: "connect".to_string(),
            timeout,
        }),
    }
}

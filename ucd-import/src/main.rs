//! ucd-import - Unicode Character Database importer
//!
//! One sequential run: obtain the XML (cache or network), decode, transform,
//! then replace the store contents and log a summary. Any failure aborts the
//! run with a non-zero exit; re-running is the recovery path.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ucd_common::Store;
use ucd_import::{pipeline, source, ImportArgs, ImportConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let args = ImportArgs::parse();
    let config = ImportConfig::resolve(&args)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting ucd-import v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("UCD version: {}", config.version);
    info!("Store: {}", config.database_path.display());

    // Everything up to here is read-only; a bad source never reaches the store
    let document = source::load_document(&config.source)
        .await
        .context("Failed to load UCD source")?;
    info!("Parsed UCD: {}", document.description);

    let prepared = pipeline::prepare(document, &config.version);

    let store = Store::open(&config.database_path, config.timeouts)
        .await
        .context("Failed to connect to store")?;

    let report = match pipeline::persist(&store, prepared).await {
        Ok(report) => report,
        Err(e) => {
            error!("Import failed: {}", e);
            store.close().await;
            return Err(e).context("Import aborted");
        }
    };

    report.log_summary();
    store.close().await;

    info!("UCD data import completed successfully");
    Ok(())
}

//! ucd-query - read-only HTTP query service over an imported UCD store

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ucd_common::config;
use ucd_common::Store;
use ucd_query::{build_router, AppState};

/// Command-line arguments for ucd-query
#[derive(Parser, Debug)]
#[command(name = "ucd-query")]
#[command(about = "Read-only HTTP query service for the imported UCD")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5730", env = "UCD_QUERY_PORT")]
    port: u16,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1", env = "UCD_QUERY_BIND")]
    bind: IpAddr,

    /// Config file (default: ~/.config/ucd/config.toml, then /etc/ucd/config.toml)
    #[arg(short, long, env = "UCD_CONFIG")]
    config: Option<PathBuf>,

    /// Folder holding the store database (also UCD_ROOT_FOLDER)
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Store database name (also UCD_DATABASE_NAME)
    #[arg(short, long)]
    database_name: Option<String>,

    /// Default tracing filter (RUST_LOG overrides)
    #[arg(long, env = "UCD_LOG_LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let toml = config::load_toml_config(args.config.as_deref())?;

    let log_level = args
        .log_level
        .clone()
        .unwrap_or_else(|| format!("{},tower_http=debug", toml.logging.level));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting ucd-query v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let root_folder = config::resolve_root_folder(args.root_folder.as_deref(), &toml);
    let database_name = config::resolve_database_name(args.database_name.as_deref(), &toml);
    let db_path = config::database_path(&root_folder, &database_name);
    info!("Store: {}", db_path.display());

    let store = match Store::open_readonly(&db_path, toml.timeouts.to_store_timeouts()).await {
        Ok(store) => {
            info!("Connected to store (read-only)");
            store
        }
        Err(e) => {
            error!("Failed to connect to store: {}", e);
            return Err(e.into());
        }
    };

    let app = build_router(AppState::new(store.clone()));

    let addr = SocketAddr::new(args.bind, args.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("ucd-query listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    store.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}

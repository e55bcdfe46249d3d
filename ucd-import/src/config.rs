//! Importer configuration
//!
//! Command-line flags (with `UCD_*` environment fallbacks) override the TOML
//! file, which overrides compiled defaults. Root folder and database name go
//! through the shared resolvers in `ucd_common::config`.

use crate::error::ImportError;
use crate::source::{ArtifactCache, SourceLocation};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use ucd_common::config::{self as common_config, TomlConfig};
use ucd_common::db::StoreTimeouts;

/// Command-line arguments for ucd-import
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "ucd-import")]
#[command(about = "Import the Unicode Character Database (UCD XML) into the document store")]
#[command(version)]
pub struct ImportArgs {
    /// Config file (default: ~/.config/ucd/config.toml, then /etc/ucd/config.toml)
    #[arg(short, long, env = "UCD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Folder holding the store database (also UCD_ROOT_FOLDER)
    #[arg(short, long)]
    pub root_folder: Option<PathBuf>,

    /// Store database name (also UCD_DATABASE_NAME)
    #[arg(short, long)]
    pub database_name: Option<String>,

    /// Web root holding `<version>/ucdxml/` release directories
    #[arg(long, env = "UCD_BASE_URL")]
    pub base_url: Option<String>,

    /// UCD version recorded in the metadata document
    #[arg(long, env = "UCD_VERSION")]
    pub ucd_version: Option<String>,

    /// Cache directory for the downloaded archive
    #[arg(long, env = "UCD_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Import from a local ucd.all.flat.xml or .zip instead of downloading
    #[arg(long, env = "UCD_SOURCE_FILE")]
    pub source_file: Option<PathBuf>,

    /// Ignore cached files and download again
    #[arg(long)]
    pub refresh: bool,

    /// Default tracing filter (RUST_LOG overrides)
    #[arg(long, env = "UCD_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Fully resolved importer configuration
#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub database_path: PathBuf,
    pub version: String,
    pub source: SourceLocation,
    pub log_level: String,
    pub timeouts: StoreTimeouts,
}

impl ImportConfig {
    /// Resolve arguments against the TOML file and defaults
    pub fn resolve(args: &ImportArgs) -> Result<Self, ImportError> {
        let toml = common_config::load_toml_config(args.config.as_deref())
            .map_err(|e| ImportError::Config(e.to_string()))?;
        Self::from_parts(args, toml)
    }

    /// Resolve arguments against an already loaded TOML config
    pub fn from_parts(args: &ImportArgs, toml: TomlConfig) -> Result<Self, ImportError> {
        let root_folder = common_config::resolve_root_folder(args.root_folder.as_deref(), &toml);
        let database_name =
            common_config::resolve_database_name(args.database_name.as_deref(), &toml);
        if database_name.is_empty() {
            return Err(ImportError::Config("database name is empty".to_string()));
        }

        let version = args
            .ucd_version
            .clone()
            .unwrap_or_else(|| toml.source.version.clone());
        if version.trim().is_empty() {
            return Err(ImportError::Config("UCD version is empty".to_string()));
        }

        let source = match &args.source_file {
            Some(path) => SourceLocation::File(path.clone()),
            None => {
                let base_url = args
                    .base_url
                    .clone()
                    .unwrap_or_else(|| toml.source.base_url.clone());
                if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
                    return Err(ImportError::Config(format!(
                        "base_url must be an http(s) URL: {base_url}"
                    )));
                }
                let cache_root = args
                    .cache_dir
                    .clone()
                    .or_else(|| toml.source.cache_dir.clone())
                    .unwrap_or_else(|| std::env::temp_dir().join("ucd"));
                let max_age = toml
                    .source
                    .cache_max_age_hours
                    .map(|hours| Duration::from_secs(hours * 3600));

                SourceLocation::Remote {
                    base_url,
                    version: version.clone(),
                    cache: ArtifactCache::new(&cache_root, &version, max_age),
                    refresh: args.refresh,
                }
            }
        };

        Ok(Self {
            database_path: common_config::database_path(&root_folder, &database_name),
            version,
            source,
            log_level: args
                .log_level
                .clone()
                .unwrap_or_else(|| toml.logging.level.clone()),
            timeouts: toml.timeouts.to_store_timeouts(),
        })
    }
}

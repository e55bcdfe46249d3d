//! Configuration loading and root folder resolution
//!
//! Every setting resolves in the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::db::StoreTimeouts;
use crate::time::secs_to_duration;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Root holding one `<version>/ucdxml/` directory per UCD release
pub const DEFAULT_BASE_URL: &str = "https://www.unicode.org/Public/";
pub const DEFAULT_UCD_VERSION: &str = "16.0.0";
pub const DEFAULT_DATABASE_NAME: &str = "unicode_db";
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const ROOT_FOLDER_ENV: &str = "UCD_ROOT_FOLDER";
pub const DATABASE_NAME_ENV: &str = "UCD_DATABASE_NAME";

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    pub database_name: Option<String>,
    pub source: SourceConfig,
    pub logging: LoggingConfig,
    pub timeouts: TimeoutsConfig,
}

/// `[source]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub version: String,
    /// Defaults to the OS temp directory
    pub cache_dir: Option<PathBuf>,
    /// Unset means a cached archive never expires
    pub cache_max_age_hours: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            version: DEFAULT_UCD_VERSION.to_string(),
            cache_dir: None,
            cache_max_age_hours: None,
        }
    }
}

/// `[logging]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive; `RUST_LOG` overrides it
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// `[timeouts]` table, in seconds
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TimeoutsConfig {
    pub connect: Option<u64>,
    pub indexes: Option<u64>,
    pub metadata: Option<u64>,
    pub code_points: Option<u64>,
    pub blocks: Option<u64>,
    pub stats: Option<u64>,
    pub lookup: Option<u64>,
    pub block_lookup: Option<u64>,
}

impl TimeoutsConfig {
    /// Overlay the configured values on the default timeouts
    pub fn to_store_timeouts(&self) -> StoreTimeouts {
        let defaults = StoreTimeouts::default();
        let pick = |configured: Option<u64>, fallback| {
            configured.map(secs_to_duration).unwrap_or(fallback)
        };
        StoreTimeouts {
            connect: pick(self.connect, defaults.connect),
            indexes: pick(self.indexes, defaults.indexes),
            metadata: pick(self.metadata, defaults.metadata),
            code_points: pick(self.code_points, defaults.code_points),
            blocks: pick(self.blocks, defaults.blocks),
            stats: pick(self.stats, defaults.stats),
            lookup: pick(self.lookup, defaults.lookup),
            block_lookup: pick(self.block_lookup, defaults.block_lookup),
        }
    }
}

/// Load the TOML config file.
///
/// With no explicit path the platform locations are searched. A missing file
/// is not an error: a warning is logged and defaults are used. A file that
/// exists but does not parse is `Error::Config`.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) => path,
            None => {
                debug!("No config file found, using defaults");
                return Ok(TomlConfig::default());
            }
        },
    };

    if !path.exists() {
        warn!("Config file not found: {}, using defaults", path.display());
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(&path)?;
    let config = toml::from_str::<TomlConfig>(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;

    debug!("Loaded config file: {}", path.display());
    Ok(config)
}

/// First existing config file among `~/.config/ucd/config.toml` and
/// `/etc/ucd/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("ucd").join("config.toml"));
    let system_config = PathBuf::from("/etc/ucd/config.toml");

    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }
    if cfg!(unix) && system_config.exists() {
        return Some(system_config);
    }
    None
}

/// Resolve the folder holding the store database
pub fn resolve_root_folder(cli_arg: Option<&Path>, toml: &TomlConfig) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = &toml.root_folder {
        return path.clone();
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Resolve the database name (the store file stem)
pub fn resolve_database_name(cli_arg: Option<&str>, toml: &TomlConfig) -> String {
    if let Some(name) = cli_arg {
        return name.to_string();
    }
    if let Ok(name) = std::env::var(DATABASE_NAME_ENV) {
        if !name.is_empty() {
            return name;
        }
    }
    toml.database_name
        .clone()
        .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string())
}

/// Store file location: `<root_folder>/<database_name>.db`
pub fn database_path(root_folder: &Path, database_name: &str) -> PathBuf {
    root_folder.join(format!("{database_name}.db"))
}

fn default_root_folder() -> PathBuf {
    // ~/.local/share/ucd, ~/Library/Application Support/ucd, %LOCALAPPDATA%\ucd
    dirs::data_local_dir()
        .map(|d| d.join("ucd"))
        .unwrap_or_else(|| PathBuf::from("./ucd_data"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_database_path() {
        let path = database_path(Path::new("/data/ucd"), "unicode_db");
        assert_eq!(path, PathBuf::from("/data/ucd/unicode_db.db"));
    }

    #[test]
    fn test_partial_timeouts_keep_defaults() {
        let timeouts = TimeoutsConfig {
            code_points: Some(120),
            ..Default::default()
        }
        .to_store_timeouts();

        assert_eq!(timeouts.code_points, Duration::from_secs(120));
        assert_eq!(timeouts.connect, Duration::from_secs(10));
        assert_eq!(timeouts.lookup, Duration::from_secs(5));
    }

    #[test]
    fn test_source_defaults() {
        let source = SourceConfig::default();
        assert_eq!(source.version, "16.0.0");
        assert_eq!(source.base_url, "https://www.unicode.org/Public/");
        assert!(source.cache_max_age_hours.is_none());
    }
}

//! Configuration loading and resolution tests
//!
//! Covers:
//! - Missing TOML file → defaults, never fatal
//! - Malformed TOML file → configuration error
//! - Priority order: CLI → environment → TOML → compiled default
//!
//! Note: tests touching UCD_* environment variables are marked #[serial].

use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use ucd_common::config::{
    load_toml_config, resolve_database_name, resolve_root_folder, TomlConfig,
    DATABASE_NAME_ENV, DEFAULT_DATABASE_NAME, ROOT_FOLDER_ENV,
};
use ucd_common::Error;

#[test]
fn test_missing_config_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = load_toml_config(Some(&dir.path().join("absent.toml"))).unwrap();

    assert!(config.root_folder.is_none());
    assert_eq!(config.source.version, "16.0.0");
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_malformed_config_file_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "root_folder = [unterminated").unwrap();

    let result = load_toml_config(Some(&path));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_full_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
root_folder = "/srv/ucd"
database_name = "ucd16"

[source]
base_url = "http://mirror.local/Public/"
version = "15.1.0"
cache_dir = "/var/cache/ucd"
cache_max_age_hours = 24

[logging]
level = "debug"

[timeouts]
code_points = 300
"#,
    )
    .unwrap();

    let config = load_toml_config(Some(&path)).unwrap();
    assert_eq!(config.root_folder, Some(PathBuf::from("/srv/ucd")));
    assert_eq!(config.database_name.as_deref(), Some("ucd16"));
    assert_eq!(config.source.base_url, "http://mirror.local/Public/");
    assert_eq!(config.source.version, "15.1.0");
    assert_eq!(config.source.cache_dir, Some(PathBuf::from("/var/cache/ucd")));
    assert_eq!(config.source.cache_max_age_hours, Some(24));
    assert_eq!(config.logging.level, "debug");

    let timeouts = config.timeouts.to_store_timeouts();
    assert_eq!(timeouts.code_points, Duration::from_secs(300));
    assert_eq!(timeouts.blocks, Duration::from_secs(30));
}

#[test]
fn test_partial_source_table_keeps_defaults() {
    let config: TomlConfig = toml::from_str("[source]\nversion = \"15.0.0\"\n").unwrap();
    assert_eq!(config.source.version, "15.0.0");
    assert!(config.source.base_url.starts_with("https://www.unicode.org/"));
}

#[test]
#[serial]
fn test_root_folder_cli_wins() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/ucd-env");
    let toml = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/ucd-toml")),
        ..Default::default()
    };

    let resolved = resolve_root_folder(Some(Path::new("/tmp/ucd-cli")), &toml);
    assert_eq!(resolved, PathBuf::from("/tmp/ucd-cli"));

    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
#[serial]
fn test_root_folder_env_beats_toml() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/ucd-env");
    let toml = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/ucd-toml")),
        ..Default::default()
    };

    assert_eq!(resolve_root_folder(None, &toml), PathBuf::from("/tmp/ucd-env"));

    env::remove_var(ROOT_FOLDER_ENV);
    assert_eq!(resolve_root_folder(None, &toml), PathBuf::from("/tmp/ucd-toml"));
}

#[test]
#[serial]
fn test_root_folder_compiled_default() {
    env::remove_var(ROOT_FOLDER_ENV);

    let resolved = resolve_root_folder(None, &TomlConfig::default());
    assert!(!resolved.as_os_str().is_empty());
    assert!(resolved.ends_with("ucd") || resolved.ends_with("ucd_data"));
}

#[test]
#[serial]
fn test_database_name_resolution() {
    env::remove_var(DATABASE_NAME_ENV);
    assert_eq!(
        resolve_database_name(None, &TomlConfig::default()),
        DEFAULT_DATABASE_NAME
    );

    env::set_var(DATABASE_NAME_ENV, "from_env");
    assert_eq!(resolve_database_name(None, &TomlConfig::default()), "from_env");
    assert_eq!(
        resolve_database_name(Some("from_cli"), &TomlConfig::default()),
        "from_cli"
    );
    env::remove_var(DATABASE_NAME_ENV);
}

//! Environment variable tests for the configuration loader.

use serial_test::serial;
use tempfile::TempDir;

use super::env_lock;
use super::file_tests::write_config_file;
use crate::loader::builder::ConfigLoader;
use crate::loader::env::env_var_or_none;
use crate::loader::error::ConfigError;

#[test]
#[serial]
fn test_env_overrides_file() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let path = write_config_file(temp_dir.path(), r#"{ "channelCapacity": 8 }"#);

    temp_env::with_vars(
        [("ZSKARTE_SHORTCUTS_CHANNEL_CAPACITY", Some("32"))],
        || {
            let config = ConfigLoader::new()
                .with_config_path(path.clone())
                .from_file()
                .unwrap()
                .from_env()
                .unwrap()
                .build()
                .unwrap();
            assert_eq!(config.channel_capacity, 32);
        },
    );
}

#[test]
#[serial]
fn test_env_booleans() {
    let _lock = env_lock().lock().unwrap();
    temp_env::with_vars(
        [
            ("ZSKARTE_SHORTCUTS_PREVENT_DEFAULT", Some("0")),
            ("ZSKARTE_LOG_JSON", Some("TRUE")),
            ("ZSKARTE_LOG_LEVEL", Some("zskarte_shortcuts=debug")),
        ],
        || {
            let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
            assert!(!config.prevent_default);
            assert!(config.log.json);
            assert_eq!(config.log.level, "zskarte_shortcuts=debug");
        },
    );
}

#[test]
#[serial]
fn test_env_invalid_bool() {
    let _lock = env_lock().lock().unwrap();
    temp_env::with_vars(
        [("ZSKARTE_SHORTCUTS_PREVENT_DEFAULT", Some("sometimes"))],
        || {
            let result = ConfigLoader::new().from_env();
            assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        },
    );
}

#[test]
#[serial]
fn test_env_invalid_capacity() {
    let _lock = env_lock().lock().unwrap();
    temp_env::with_vars(
        [("ZSKARTE_SHORTCUTS_CHANNEL_CAPACITY", Some("-4"))],
        || {
            let result = ConfigLoader::new().from_env();
            assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        },
    );
}

#[test]
#[serial]
fn test_empty_env_vars_ignored() {
    let _lock = env_lock().lock().unwrap();
    temp_env::with_vars(
        [
            ("ZSKARTE_LOG_LEVEL", Some("   ")),
            ("ZSKARTE_SHORTCUTS_CHANNEL_CAPACITY", Some("")),
        ],
        || {
            assert_eq!(env_var_or_none("ZSKARTE_LOG_LEVEL"), None);
            let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
            assert_eq!(config.log.level, "info");
        },
    );
}

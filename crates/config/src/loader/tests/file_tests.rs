//! Config file loading tests.

use std::io::Write;
use std::path::{Path, PathBuf};

use serial_test::serial;
use tempfile::TempDir;

use super::env_lock;
use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;
use crate::types::ShortcutCommand;

pub fn write_config_file(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("shortcuts.json");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn test_file_values_applied() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config_file(
        temp_dir.path(),
        r#"{
            "overrides": { "cancel_drawing": "esc", "redo": "mod+shift+z" },
            "channelCapacity": 8,
            "log": { "level": "trace", "json": true }
        }"#,
    );

    let config = ConfigLoader::new()
        .with_config_path(path)
        .from_file()
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.overrides.get(ShortcutCommand::CancelDrawing), Some("esc"));
    assert_eq!(config.overrides.get(ShortcutCommand::Redo), Some("mod+shift+z"));
    assert_eq!(config.channel_capacity, 8);
    assert!(config.prevent_default);
    assert_eq!(config.log.level, "trace");
    assert!(config.log.json);
}

#[test]
fn test_missing_file_is_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let config = ConfigLoader::new()
        .with_config_path(temp_dir.path().join("absent.json"))
        .from_file()
        .unwrap()
        .build()
        .unwrap();
    assert!(config.overrides.is_empty());
}

#[test]
fn test_malformed_file_is_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config_file(temp_dir.path(), "{ not json");

    let result = ConfigLoader::new().with_config_path(path).from_file();
    assert!(matches!(result, Err(ConfigError::ConfigFileParse { .. })));
}

#[test]
fn test_unknown_key_is_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config_file(temp_dir.path(), r#"{ "zoom": 3 }"#);

    let result = ConfigLoader::new().with_config_path(path).from_file();
    assert!(matches!(result, Err(ConfigError::ConfigFileParse { .. })));
}

#[test]
fn test_builder_after_file_wins() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config_file(temp_dir.path(), r#"{ "preventDefault": false }"#);

    let config = ConfigLoader::new()
        .with_config_path(path)
        .from_file()
        .unwrap()
        .with_prevent_default(true)
        .build()
        .unwrap();
    assert!(config.prevent_default);
}

#[test]
#[serial]
fn test_path_from_env() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let path = write_config_file(temp_dir.path(), r#"{ "channelCapacity": 12 }"#);

    temp_env::with_vars(
        [("ZSKARTE_SHORTCUTS_CONFIG", Some(path.to_str().unwrap()))],
        || {
            let config = ConfigLoader::new().from_file().unwrap().build().unwrap();
            assert_eq!(config.channel_capacity, 12);
        },
    );
}

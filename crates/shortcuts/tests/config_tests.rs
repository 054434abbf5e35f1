//! Dispatcher wiring from an on-disk configuration file.

mod common;

use std::io::Write;

use common::{MapCall, RecordingMap};
use tempfile::TempDir;
use zskarte_config::{ConfigError, ConfigLoader, KeybindError, ShortcutOverrides};
use zskarte_shortcuts::{KeyEvent, KeyEventSource, ShortcutCommand, ShortcutService, ShortcutTable};

fn write_config(dir: &TempDir, json: &str) -> std::path::PathBuf {
    let path = dir.path().join("shortcuts.json");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "{}", json).unwrap();
    path
}

#[test]
fn file_overrides_reach_the_dispatcher() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"{
            "overrides": { "cancel_drawing": "shift+escape", "draw_text": "alt+t" },
            "preventDefault": false,
            "channelCapacity": 16
        }"#,
    );

    let config = ConfigLoader::new()
        .with_config_path(path)
        .from_file()
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(config.channel_capacity, 16);

    let source = KeyEventSource::started(config.channel_capacity);
    let mut service = ShortcutService::new(RecordingMap::editable(), &source, &config).unwrap();

    let plain_escape = KeyEvent::new("Escape");
    source.emit(plain_escape.clone());
    source.emit(KeyEvent::new("Escape").with_shift());
    source.emit(KeyEvent::new("KeyT").with_alt());
    let outcome = service.pump();

    assert_eq!(
        outcome.executed,
        vec![ShortcutCommand::CancelDrawing, ShortcutCommand::DrawText]
    );
    assert_eq!(service.map().calls, vec![MapCall::CancelDrawing]);
    assert!(!plain_escape.default_prevented());
}

#[test]
fn conflicting_file_overrides_fail_to_load() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, r#"{ "overrides": { "redo": "mod+z" } }"#);

    let result = ConfigLoader::new()
        .with_config_path(path)
        .from_file()
        .unwrap()
        .build();

    assert!(matches!(
        result,
        Err(ConfigError::Keybind(KeybindError::Conflict { .. }))
    ));
}

#[test]
fn invalid_overrides_fall_back_to_defaults() {
    let mut overrides = ShortcutOverrides::default();
    overrides
        .overrides
        .insert(ShortcutCommand::Undo, "mod+w".to_string());

    let table = ShortcutTable::from_overrides(&overrides, true);

    assert_eq!(table, ShortcutTable::defaults(true));
}

#[test]
fn help_entries_follow_the_table() {
    let table = ShortcutTable::default();
    let entries = table.help_entries();

    assert_eq!(entries.len(), ShortcutCommand::ALL.len());
    assert_eq!(entries[0].keys, "Mod+Backspace");
    let copy = entries
        .iter()
        .find(|entry| entry.keys == "Mod+C")
        .unwrap();
    assert!(!copy.editable_only);
    assert!(entries.iter().filter(|entry| entry.editable_only).count() == 10);
}

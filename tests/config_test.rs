//! Configuration loading tests
//!
//! Tests that the JSON configuration record loads, creates defaults, merges
//! user values, and persists setter calls.

use codevoice::config::{Config, Mode};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_absent_file_creates_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join(".codevoice.json");

    let config = Config::load(Some(&path)).expect("load should create defaults");
    assert_eq!(config.mode, Mode::Full);
    assert!(path.exists(), "default config file should be written out");

    // The written file must itself parse back with mode = full
    let contents = fs::read_to_string(&path).expect("read config");
    assert!(contents.contains("\"mode\": \"full\""));
}

#[test]
fn test_user_values_merge_over_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join(".codevoice.json");
    fs::write(
        &path,
        r#"{
            "assistant_name": "Nova",
            "mode": "silent",
            "prefixes": { "urgent": "Drop everything! " }
        }"#,
    )
    .expect("write config");

    let config = Config::load(Some(&path)).expect("load");
    assert_eq!(config.assistant_name, "Nova");
    assert_eq!(config.mode, Mode::Silent);

    // Overridden prefix applied, untouched defaults kept
    assert_eq!(config.prefixes["urgent"], "Drop everything! ");
    assert!(config.prefixes.contains_key("gentle"));
    assert!(config.contextual_messages.contains_key("task_completed"));
    assert_eq!(config.voice_rate, 180);
}

#[test]
fn test_unreadable_file_falls_back_to_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join(".codevoice.json");
    fs::write(&path, "{ not json").expect("write garbage");

    let config = Config::load(Some(&path)).expect("load should not error");
    assert_eq!(config.mode, Mode::Full);
}

#[test]
fn test_set_mode_persists() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join(".codevoice.json");

    let mut config = Config::load(Some(&path)).expect("load");
    config.set_mode(Mode::Off).expect("set mode");

    let reloaded = Config::load(Some(&path)).expect("reload");
    assert_eq!(reloaded.mode, Mode::Off);
}

#[test]
fn test_set_key_persists_and_validates() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join(".codevoice.json");

    let mut config = Config::load(Some(&path)).expect("load");
    config
        .set_key("voice_rate", serde_json::json!(220))
        .expect("set voice_rate");
    config
        .set_key("emotional_prefix", serde_json::json!(false))
        .expect("set emotional_prefix");

    assert!(config.set_key("no_such_setting", serde_json::json!(1)).is_err());

    let reloaded = Config::load(Some(&path)).expect("reload");
    assert_eq!(reloaded.voice_rate, 220);
    assert!(!reloaded.emotional_prefix);
}

#[test]
fn test_device_list_round_trip() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join(".codevoice.json");

    let mut config = Config::load(Some(&path)).expect("load");
    assert!(config.add_device("AirPods Pro").expect("add"));
    assert!(!config.add_device("AirPods Pro").expect("re-add is a no-op"));

    let reloaded = Config::load(Some(&path)).expect("reload");
    assert_eq!(reloaded.my_devices, vec!["AirPods Pro".to_string()]);

    let mut config = reloaded;
    assert!(config.remove_device("AirPods Pro").expect("remove"));
    assert!(!config.remove_device("AirPods Pro").expect("gone already"));

    let reloaded = Config::load(Some(&path)).expect("reload");
    assert!(reloaded.my_devices.is_empty());
}

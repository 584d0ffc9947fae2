use std::time::Duration;

use checknote_app::config::{CheckNoteConfig, load_config, load_or_init, migrate, save_config};
use serde_json::json;

#[test]
fn defaults_match_reference_timings() {
    let config = CheckNoteConfig::default();
    let session = config.session_config();
    assert_eq!(session.advance_delay, Duration::from_millis(100));
    assert_eq!(session.toast_duration, Duration::from_secs(2));
    assert!(config.questions_path.is_none());
}

#[test]
fn load_or_init_writes_defaults_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let first = load_or_init(&path).unwrap();
    assert!(path.exists());
    let second = load_or_init(&path).unwrap();
    assert_eq!(first, second);
    assert_eq!(second.config_version, 1);
}

#[test]
fn save_and_load_preserve_custom_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let mut config = CheckNoteConfig::default();
    config.advance_delay_ms = 250;
    config.provider_name = "Jo Smith, NP".to_string();
    config.data_dir = Some(dir.path().join("data"));
    save_config(&path, &config).unwrap();

    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.data_dir().unwrap(), dir.path().join("data"));
    assert_eq!(loaded.footer_context().provider_name, "Jo Smith, NP");
}

#[test]
fn v0_config_is_migrated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        json!({ "created_at": "2025-01-01T00:00:00Z", "advance_delay_ms": 50 }).to_string(),
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.advance_delay_ms, 50);
    assert_eq!(config.toast_duration_ms, 2000);
    assert_eq!(config.provider_name, "Nathan Puls, APRN");
    assert_eq!(config.supervising_physician, "Dr. Siddiqui");
}

#[test]
fn migration_keeps_existing_names() {
    let migrated = migrate(json!({ "provider_name": "A" }), 0).unwrap();
    assert_eq!(migrated["provider_name"], "A");
    assert_eq!(migrated["config_version"], 1);
}

#[test]
fn newer_config_version_is_rejected() {
    assert!(migrate(json!({ "config_version": 9 }), 9).is_err());
}

#[test]
fn non_object_config_is_rejected() {
    assert!(migrate(json!([1, 2]), 0).is_err());
}

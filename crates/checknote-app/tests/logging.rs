use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use checknote_app::logging::load_config_with;
use serde_json::json;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn migration_is_logged_while_loading_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, json!({ "created_at": "2025-01-01T00:00:00Z" }).to_string()).unwrap();

    let captured = Captured::default();
    let writer = captured.clone();
    let config = load_config_with(&path, move || writer.clone()).unwrap();

    assert_eq!(config.config_version, 1);
    assert!(captured.text().contains("migrated config v0"));
}

#[test]
fn first_run_logs_config_creation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let captured = Captured::default();
    let writer = captured.clone();
    load_config_with(&path, move || writer.clone()).unwrap();

    assert!(path.exists());
    assert!(captured.text().contains("config saved"));
}

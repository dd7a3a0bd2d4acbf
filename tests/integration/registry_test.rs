//! Registration against an OpenClaw state directory layout

use std::fs;

use claw_import::registry::{self, RegistryError, SessionEntry};
use claw_import::ModelRef;
use serde_json::Value;
use tempfile::TempDir;

fn state_with_store(content: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let sessions = registry::sessions_dir(dir.path(), "main");
    fs::create_dir_all(&sessions).unwrap();
    let store = sessions.join("sessions.json");
    fs::write(&store, content).unwrap();
    (dir, store)
}

#[test]
fn store_path_follows_openclaw_layout() {
    let dir = TempDir::new().unwrap();
    let store = registry::store_path(dir.path(), "work");
    assert!(store.ends_with("agents/work/sessions/sessions.json"));
}

#[test]
fn registration_leaves_backup_next_to_store() {
    let (dir, store) = state_with_store(r#"{"agent:main:main": {"sessionId": "keep"}}"#);
    let entry = SessionEntry::new(
        "imported",
        &dir.path().join("imported.jsonl"),
        &ModelRef::split("claude-3", "anthropic"),
        Some("From laptop"),
    );

    let registered = registry::register(&store, "main", &entry).unwrap();

    let backups: Vec<_> = fs::read_dir(store.parent().unwrap())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().contains(".bak."))
        .collect();
    assert_eq!(backups.len(), 1);
    assert_eq!(registered.backup.as_deref(), Some(backups[0].path().as_path()));

    let written: Value = serde_json::from_str(&fs::read_to_string(&store).unwrap()).unwrap();
    assert_eq!(written["agent:main:main"]["sessionId"], "keep");
    let imported = &written["agent:main:claude-code-import"];
    assert_eq!(imported["label"], "From laptop");
    assert_eq!(imported["inputTokens"], 0);
    assert_eq!(imported["systemSent"], false);
}

#[test]
fn missing_store_is_reported() {
    let dir = TempDir::new().unwrap();
    let store = registry::store_path(dir.path(), "main");
    let entry = SessionEntry::new(
        "s",
        &dir.path().join("s.jsonl"),
        &ModelRef::split("m", "anthropic"),
        None,
    );

    let err = registry::register(&store, "main", &entry).unwrap_err();
    assert!(matches!(err, RegistryError::NotFound { .. }));
    assert!(err.to_string().contains("sessions.json not found"));
    assert!(!store.exists());
}

use std::fs;

use lookup_engine::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
use tempfile::TempDir;

#[test]
fn file_store_round_trips_across_reopen() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("prefs.ron");

    let mut store = FilePreferenceStore::open(&path);
    assert_eq!(store.get("theme"), None);
    store.set("theme", "dark").unwrap();
    store.set("username", "ann").unwrap();

    let mut reopened = FilePreferenceStore::open(&path);
    assert_eq!(reopened.get("theme").as_deref(), Some("dark"));
    assert_eq!(reopened.get("username").as_deref(), Some("ann"));

    reopened.remove("username").unwrap();
    let reopened = FilePreferenceStore::open(&path);
    assert_eq!(reopened.get("username"), None);
    assert_eq!(reopened.get("theme").as_deref(), Some("dark"));
}

#[test]
fn file_store_creates_missing_directory() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("prefs.ron");

    let mut store = FilePreferenceStore::open(&path);
    store.set("theme", "light").unwrap();
    assert!(path.is_file());
}

#[test]
fn corrupt_file_falls_back_to_empty() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("prefs.ron");
    fs::write(&path, "{ not ron").unwrap();

    let mut store = FilePreferenceStore::open(&path);
    assert_eq!(store.get("theme"), None);

    store.set("theme", "dark").unwrap();
    assert_eq!(
        FilePreferenceStore::open(&path).get("theme").as_deref(),
        Some("dark")
    );
}

#[test]
fn write_fails_when_parent_is_a_file() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not_a_dir");
    fs::write(&blocker, "x").unwrap();

    let mut store = FilePreferenceStore::open(blocker.join("prefs.ron"));
    assert!(store.set("theme", "dark").is_err());
}

#[test]
fn memory_store_get_set_remove() {
    let mut store = MemoryPreferenceStore::new();
    store.set("theme", "dark").unwrap();
    assert_eq!(store.get("theme").as_deref(), Some("dark"));
    store.remove("theme").unwrap();
    assert_eq!(store.get("theme"), None);
}

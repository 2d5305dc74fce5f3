use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use taskgroups::io::interchange::{export_groups, import_groups};
use taskgroups::io::store_io::{load_file, save_file};
use taskgroups::model::Task;
use taskgroups::ops::store::Store;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn read_fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|e| panic!("Could not read fixture {}: {}", name, e))
}

// ============================================================================
// Interchange text
// ============================================================================

#[test]
fn round_trip_is_byte_identical() {
    let source = read_fixture("task_groups.json");
    let groups = import_groups(&source).unwrap();
    assert_eq!(groups.len(), 3);
    assert_eq!(export_groups(&groups).unwrap(), source);
}

#[test]
fn legacy_file_fills_defaults() {
    let groups = import_groups(&read_fixture("legacy_groups.json")).unwrap();
    assert_eq!(
        groups[0].tasks,
        vec![
            Task::new("Buy milk", vec![]),
            Task {
                text: "Wash car".into(),
                completed: true,
                tags: vec![],
            },
            Task::new("Pay rent", vec!["bills".into()]),
        ]
    );
}

#[test]
fn legacy_file_exports_every_field() {
    let groups = import_groups(&read_fixture("legacy_groups.json")).unwrap();
    let text = export_groups(&groups).unwrap();
    assert!(!text.contains("color"));
    assert!(!text.contains("\"id\""));
    assert_eq!(text.matches("\"tags\"").count(), 3);
    assert_eq!(text.matches("\"completed\"").count(), 3);
}

// ============================================================================
// Files
// ============================================================================

#[test]
fn save_then_load_restores_store() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("taskGroups.json");

    let mut store = Store::new();
    load_file(&mut store, &fixture_path("task_groups.json")).unwrap();
    store.select_group(1).unwrap();
    store.add_task(1, "Write report", "work, urgent").unwrap();
    save_file(&mut store, &path).unwrap();
    assert!(!store.is_dirty());

    let mut loaded = Store::new();
    assert_eq!(load_file(&mut loaded, &path).unwrap(), 3);
    assert_eq!(loaded.groups(), store.groups());
    assert_eq!(loaded.selected_index(), None);
}

#[test]
fn failed_load_leaves_store_untouched() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("broken.json");
    fs::write(&path, "[{\"name\": \"Home\"").unwrap();

    let mut store = Store::new();
    load_file(&mut store, &fixture_path("task_groups.json")).unwrap();
    store.select_group(0).unwrap();
    let before = store.clone();

    assert!(load_file(&mut store, &path).is_err());
    assert!(load_file(&mut store, &tmp.path().join("missing.json")).is_err());
    assert_eq!(store, before);
}

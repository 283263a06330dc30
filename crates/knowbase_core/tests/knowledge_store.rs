use knowbase_core::{Entry, KnowledgeStore, StoreConfig, StoreError};
use std::fs;
use tempfile::TempDir;

fn config_in(dir: &TempDir) -> StoreConfig {
    StoreConfig::new(dir.path().join("knowledge_data.json"))
}

#[test]
fn open_without_backing_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = KnowledgeStore::open(&config_in(&dir)).unwrap();
    assert!(store.is_empty());
    assert!(!dir.path().join("knowledge_data.json").exists());
}

#[test]
fn add_search_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = KnowledgeStore::open(&config_in(&dir)).unwrap();

    store
        .add("Python Tips", "Use list comprehensions")
        .unwrap();
    assert_eq!(
        store.list_all(),
        vec![Entry::new("Python Tips", "Use list comprehensions")]
    );

    let hits = store.search("python");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Python Tips");
    assert!(store.search("java").is_empty());

    let err = store.add("", "orphan").unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(store.len(), 1);
}

#[test]
fn entries_round_trip_through_fresh_store() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let expected = {
        let mut store = KnowledgeStore::open(&config).unwrap();
        store.add("first", "alpha").unwrap();
        store.add("second", "beta").unwrap();
        store.add("first", "alpha").unwrap();
        store.add("unicode", "naïve café ✓").unwrap();
        store.list_all()
    };

    let reopened = KnowledgeStore::open(&config).unwrap();
    assert_eq!(reopened.list_all(), expected);
    assert_eq!(reopened.len(), 4);
}

#[test]
fn backing_file_is_json_array_of_records() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let mut store = KnowledgeStore::open(&config).unwrap();
    store.add("t", "c").unwrap();

    let raw = fs::read_to_string(&config.backing_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value, serde_json::json!([{"title": "t", "content": "c"}]));
    assert!(!dir.path().join("knowledge_data.json.tmp").exists());
}

#[test]
fn existing_file_written_by_other_tools_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    fs::write(
        &config.backing_path,
        r#"[{"title": "Legacy", "content": "from an older run"}]"#,
    )
    .unwrap();

    let store = KnowledgeStore::open(&config).unwrap();
    assert_eq!(store.search("OLDER").len(), 1);
}

#[test]
fn validation_rejects_every_empty_combination() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = KnowledgeStore::open(&config_in(&dir)).unwrap();
    store.add("keep", "me").unwrap();

    for (title, content) in [("", "x"), ("x", ""), ("", "")] {
        let err = store.add(title, content).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }
    assert_eq!(store.list_all(), vec![Entry::new("keep", "me")]);

    let reopened = KnowledgeStore::open(&config_in(&dir)).unwrap();
    assert_eq!(reopened.len(), 1);
}

#[test]
fn corrupt_backing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    fs::write(&config.backing_path, "{not json").unwrap();

    let err = KnowledgeStore::open(&config).err().unwrap();
    assert!(matches!(err, StoreError::CorruptState(_)));
}

#[test]
fn wrong_record_shape_is_corrupt_state() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    fs::write(&config.backing_path, r#"[{"title": "only title"}]"#).unwrap();

    let err = KnowledgeStore::open(&config).err().unwrap();
    assert!(matches!(err, StoreError::CorruptState(_)));
}

#[test]
fn failed_reload_keeps_current_state() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let mut store = KnowledgeStore::open(&config).unwrap();
    store.add("stable", "entry").unwrap();

    fs::write(&config.backing_path, "garbage").unwrap();
    assert!(store.load().is_err());
    assert_eq!(store.list_all(), vec![Entry::new("stable", "entry")]);
}

#[test]
fn load_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let mut store = KnowledgeStore::open(&config).unwrap();
    store.add("a", "b").unwrap();

    store.load().unwrap();
    let first = store.list_all();
    store.load().unwrap();
    assert_eq!(store.list_all(), first);
}

#[test]
fn search_does_not_mutate_collection() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = KnowledgeStore::open(&config_in(&dir)).unwrap();
    store.add("Rust", "borrow checker").unwrap();
    store.add("Go", "goroutines").unwrap();

    let before = store.list_all();
    let mut hits = store.search("rust");
    hits[0].title.push_str(" edited");
    let _ = store.search("");
    assert_eq!(store.list_all(), before);
}

#[test]
fn empty_query_returns_all_entries() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = KnowledgeStore::open(&config_in(&dir)).unwrap();
    store.add("one", "1").unwrap();
    store.add("two", "2").unwrap();
    assert_eq!(store.search(""), store.list_all());
}

#[test]
fn add_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path().join("nested/deeper/data.json"));
    let mut store = KnowledgeStore::open(&config).unwrap();
    store.add("t", "c").unwrap();
    assert!(config.backing_path.exists());
    assert_eq!(store.backing_path(), config.backing_path);
}

#[test]
fn failed_temp_write_keeps_backing_file_and_memory() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let mut store = KnowledgeStore::open(&config).unwrap();
    store.add("kept", "entry").unwrap();
    let before = fs::read(&config.backing_path).unwrap();

    // A directory squatting on the temp path makes the write fail for any user.
    fs::create_dir(dir.path().join("knowledge_data.json.tmp")).unwrap();
    let err = store.add("dropped", "entry").unwrap_err();

    assert!(matches!(err, StoreError::Persistence(_)));
    assert_eq!(store.list_all(), vec![Entry::new("kept", "entry")]);
    assert_eq!(fs::read(&config.backing_path).unwrap(), before);

    let reopened = KnowledgeStore::open(&config).unwrap();
    assert_eq!(reopened.list_all(), vec![Entry::new("kept", "entry")]);
}

#[test]
fn failed_rename_removes_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let mut store = KnowledgeStore::open(&config).unwrap();

    // Renaming a file over a directory fails regardless of permissions.
    fs::create_dir(&config.backing_path).unwrap();
    let err = store.add("dropped", "entry").unwrap_err();

    assert!(matches!(err, StoreError::Persistence(_)));
    assert!(store.is_empty());
    assert!(!dir.path().join("knowledge_data.json.tmp").exists());
}

#[test]
fn unusable_parent_directory_rolls_back_append() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");
    let config = StoreConfig::new(data_dir.join("knowledge_data.json"));
    let mut store = KnowledgeStore::open(&config).unwrap();
    store.add("kept", "entry").unwrap();

    fs::remove_dir_all(&data_dir).unwrap();
    fs::write(&data_dir, b"not a directory").unwrap();
    let err = store.add("dropped", "entry").unwrap_err();

    assert!(matches!(err, StoreError::Persistence(_)));
    assert_eq!(store.list_all(), vec![Entry::new("kept", "entry")]);

    store.add("", "still validated").unwrap_err();
    assert_eq!(store.len(), 1);
}

#[test]
fn empty_fields_in_backing_file_are_corrupt_state() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    fs::write(
        &config.backing_path,
        r#"[{"title": "ok", "content": "fine"}, {"title": "", "content": ""}]"#,
    )
    .unwrap();

    let err = KnowledgeStore::open(&config).err().unwrap();
    assert!(matches!(err, StoreError::CorruptState(_)));
    assert!(err.to_string().contains("entry 1"));
}

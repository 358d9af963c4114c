use compare_session::{
    InputStore, JsonFileStore, MemoryStore, StoredInputs, MODIFIED_KEY, ORIGINAL_KEY,
};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_memory_store_round_trip() {
    let mut store = MemoryStore::new();
    assert_eq!(store.load(ORIGINAL_KEY).unwrap(), None);

    store.store(ORIGINAL_KEY, "left").unwrap();
    assert_eq!(store.load(ORIGINAL_KEY).unwrap().as_deref(), Some("left"));
}

#[test]
fn test_missing_keys_load_as_empty() {
    let store = MemoryStore::new();
    let inputs = StoredInputs::load(&store).unwrap();
    assert_eq!(inputs, StoredInputs::default());
}

#[test]
fn test_json_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("inputs.json");

    let mut store = JsonFileStore::open(&path).unwrap();
    let inputs = StoredInputs {
        original: "line one\nline two".to_string(),
        modified: "line one\nline 2 🚀".to_string(),
    };
    inputs.save(&mut store).unwrap();

    let reopened = JsonFileStore::open(&path).unwrap();
    assert_eq!(StoredInputs::load(&reopened).unwrap(), inputs);
    assert_eq!(reopened.path(), path.as_path());

    // No temporary file is left behind
    assert!(!dir.path().join("inputs.json.tmp").exists());
}

#[test]
fn test_json_store_uses_fixed_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("inputs.json");

    let mut store = JsonFileStore::open(&path).unwrap();
    store.store(ORIGINAL_KEY, "a").unwrap();
    store.store(MODIFIED_KEY, "b").unwrap();

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["text-compare-original"], "a");
    assert_eq!(raw["text-compare-modified"], "b");
}

#[test]
fn test_json_store_missing_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::open(dir.path().join("absent.json")).unwrap();
    assert_eq!(store.load(ORIGINAL_KEY).unwrap(), None);
}

#[test]
fn test_json_store_rejects_non_object() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("inputs.json");
    fs::write(&path, "[1, 2, 3]").unwrap();

    let err = JsonFileStore::open(&path).unwrap_err();
    assert!(err.to_string().contains("not a JSON object"), "{}", err);
}

#[test]
fn test_json_store_rejects_non_string_value() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("inputs.json");
    fs::write(&path, r#"{"text-compare-original": 42}"#).unwrap();

    let store = JsonFileStore::open(&path).unwrap();
    assert!(store.load(ORIGINAL_KEY).is_err());
    assert!(StoredInputs::load(&store).is_err());
}

#[test]
fn test_json_store_reports_invalid_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("inputs.json");
    fs::write(&path, "{not json").unwrap();

    let err = JsonFileStore::open(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse input store"));
}

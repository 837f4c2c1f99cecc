use super::*;
use tempfile::tempdir;

#[test]
fn test_load_absent_is_none() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("myapp.json");

    assert!(Registry::load(&path).unwrap().is_none());
}

#[test]
fn test_save_and_load_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("myapp.json");

    let mut registry = Registry::default();
    registry.insert(PatchRecord::applied_now(0, "init.sql"));
    registry.insert(PatchRecord::applied_now(3, "003_indexes.sql"));
    registry.save(&path).unwrap();

    let loaded = Registry::load(&path).unwrap().unwrap();
    assert_eq!(loaded.len(), 2);
    assert!(loaded.contains(0));
    assert!(loaded.contains(3));
    assert!(!loaded.contains(1));

    let names: Vec<&str> = loaded.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["init.sql", "003_indexes.sql"]);
}

#[test]
fn test_load_empty_array_is_an_empty_registry() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("myapp.json");
    fs::write(&path, "[]").unwrap();

    let loaded = Registry::load(&path).unwrap();
    assert!(loaded.is_some());
    assert!(loaded.unwrap().is_empty());
}

#[test]
fn test_load_corrupt_bookmark() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("myapp.json");
    fs::write(&path, "{ not json").unwrap();

    let err = Registry::load(&path).unwrap_err();
    assert!(matches!(err, CoreError::RegistryUnreadable { .. }));
}

#[test]
fn test_load_wrong_shape_is_unreadable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("myapp.json");
    fs::write(&path, r#"{"number": 1}"#).unwrap();

    let err = Registry::load(&path).unwrap_err();
    assert!(matches!(err, CoreError::RegistryUnreadable { .. }));
}

#[test]
fn test_save_sorts_by_number() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("myapp.json");

    let mut registry = Registry::default();
    registry.insert(PatchRecord::applied_now(7, "007_late.sql"));
    registry.insert(PatchRecord::applied_now(2, "002_early.sql"));
    registry.insert(PatchRecord::applied_now(5, "005_middle.sql"));
    registry.save(&path).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let numbers: Vec<u64> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["number"].as_u64().unwrap())
        .collect();
    assert_eq!(numbers, vec![2, 5, 7]);
}

#[test]
fn test_save_creates_parent_directory() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bookmarks").join("myapp.json");

    Registry::default().save(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn test_insert_replaces_same_number() {
    let mut registry = Registry::default();
    registry.insert(PatchRecord::applied_now(1, "001_old.sql"));
    registry.insert(PatchRecord::applied_now(1, "001_new.sql"));

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.iter().next().unwrap().name, "001_new.sql");
}

#[test]
fn test_bookmark_path() {
    assert_eq!(
        bookmark_path(Path::new("/var/lib/sqlpatch"), "myapp"),
        PathBuf::from("/var/lib/sqlpatch/myapp.json")
    );
}

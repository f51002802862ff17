//! Integration test: loading and saving documents on disk.

use jnav_core::{Document, TreeError};

#[test]
fn open_modify_save_reload() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("settings.json");
    std::fs::write(&file, r#"{"name": "svc", "replicas": 2}"#).unwrap();

    let mut doc = Document::open(&file).unwrap();
    assert_eq!(doc.file_path(), Some(file.as_path()));
    doc.set("replicas", 3).unwrap();
    doc.set("labels.tier", "backend").unwrap();
    doc.save().unwrap();

    let text = std::fs::read_to_string(&file).unwrap();
    assert!(text.contains('\n'), "saved output is pretty-printed");

    let reloaded = Document::open(&file).unwrap();
    assert_eq!(reloaded.get::<i32>("replicas").unwrap(), 3);
    assert_eq!(reloaded.get::<String>("labels.tier").unwrap(), "backend");
    assert_eq!(reloaded.members("labels"), ["tier"]);
}

#[test]
fn save_to_associates_new_path() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("out.json");

    let mut doc = Document::new();
    doc.set("k", "v").unwrap();
    doc.save_to(&file).unwrap();
    assert_eq!(doc.file_path(), Some(file.as_path()));

    doc.set("k", "w").unwrap();
    doc.load().unwrap();
    assert_eq!(doc.get::<String>("k").unwrap(), "v");
}

#[test]
fn load_errors() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.json");
    assert!(matches!(Document::open(&missing), Err(TreeError::Io(_))));

    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "{\"a\": ").unwrap();
    assert!(matches!(Document::open(&broken), Err(TreeError::Parse(_))));
}

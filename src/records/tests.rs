//! Unit tests for the records module.

use std::path::PathBuf;

use bevy::math::{UVec2, Vec2};
use image::{Rgba, RgbaImage};
use serde_json::{Value, json};

use super::*;
use crate::canvas::{EditorSession, FontBook, TemplateMeta, TextStyle};
use crate::constants::{AGREEMENTS_KEY, IMAGE_TEMPLATES_KEY};

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("stampwork-{}-{}", name, uuid::Uuid::new_v4()))
}

fn meta(name: &str) -> TemplateMeta {
    TemplateMeta {
        name: name.to_string(),
        category: "Contracts".to_string(),
        description: "Standard lease".to_string(),
    }
}

struct FailingStore;

impl RecordStore for FailingStore {
    fn load(&self, _key: &str) -> RecordResult<Vec<Value>> {
        Ok(Vec::new())
    }

    fn save(&mut self, _key: &str, _records: &[Value]) -> RecordResult<()> {
        Err(RecordError::Io {
            path: PathBuf::from("/read-only"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }
}

// Store tests
#[test]
fn test_file_store_missing_key_is_empty() {
    let store = JsonFileStore::new(temp_dir("missing"));
    assert!(store.load(IMAGE_TEMPLATES_KEY).unwrap().is_empty());
}

#[test]
fn test_file_store_round_trip() {
    let dir = temp_dir("roundtrip");
    let mut store = JsonFileStore::new(&dir);
    let records = vec![json!({"id": "a1", "number": "AG-1"}), json!({"id": 7})];
    store.save(AGREEMENTS_KEY, &records).unwrap();

    assert!(dir.join("agreements.json").exists());
    let reopened = JsonFileStore::new(&dir);
    assert_eq!(reopened.load(AGREEMENTS_KEY).unwrap(), records);

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn test_file_store_rejects_non_array() {
    let dir = temp_dir("malformed");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("agreements.json"), r#"{"id": 1}"#).unwrap();

    let store = JsonFileStore::new(&dir);
    assert!(matches!(
        store.load(AGREEMENTS_KEY),
        Err(RecordError::Malformed { .. })
    ));

    let _ = std::fs::remove_dir_all(dir);
}

// Template library tests
#[test]
fn test_library_stub_lifecycle() {
    let mut library = TemplateLibrary::open(Box::new(MemoryStore::new())).unwrap();
    let id = library.create_stub(&meta("Lease")).unwrap();

    let summaries = library.summaries();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].name, "Lease");
    assert_eq!(summaries[0].element_count, 0);
    assert!(!summaries[0].has_image);

    library.update_meta(id, &meta("Lease 2025")).unwrap();
    assert_eq!(library.get(id).unwrap().name, "Lease 2025");

    assert!(library.delete(id).unwrap());
    assert!(!library.delete(id).unwrap());
    assert!(library.is_empty());
}

#[test]
fn test_update_meta_unknown_id_is_not_found() {
    let mut library = TemplateLibrary::open(Box::new(MemoryStore::new())).unwrap();
    let err = library
        .update_meta(crate::canvas::TemplateId::new(), &meta("Ghost"))
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_stub_with_blank_name_is_rejected() {
    let mut library = TemplateLibrary::open(Box::new(MemoryStore::new())).unwrap();
    assert!(matches!(
        library.create_stub(&meta("  ")),
        Err(RecordError::Validation(_))
    ));
    assert!(library.is_empty());
}

#[test]
fn test_failed_write_keeps_library_unchanged() {
    let mut library = TemplateLibrary::open(Box::new(FailingStore)).unwrap();
    assert!(library.create_stub(&meta("Lease")).is_err());
    assert!(library.is_empty());
}

#[test]
fn test_unreadable_records_are_skipped() {
    let good = serde_json::to_value(crate::canvas::ImageTemplate::stub(&meta("Good")).unwrap()).unwrap();
    let store = MemoryStore::with_records(IMAGE_TEMPLATES_KEY, vec![json!({"bogus": true}), good]);
    let library = TemplateLibrary::open(Box::new(store)).unwrap();
    assert_eq!(library.len(), 1);
    assert_eq!(library.templates()[0].name, "Good");
}

#[test]
fn test_unreadable_records_survive_writes() {
    let dir = temp_dir("unreadable");
    let legacy = json!({"id": "old", "name": "Legacy", "textElements": [{"fontSize": "24"}]});
    JsonFileStore::new(&dir)
        .save(IMAGE_TEMPLATES_KEY, &[legacy.clone()])
        .unwrap();

    let mut library = TemplateLibrary::open(Box::new(JsonFileStore::new(&dir))).unwrap();
    assert!(library.is_empty());
    let id = library.create_stub(&meta("Lease")).unwrap();
    library.delete(id).unwrap();

    let records = JsonFileStore::new(&dir).load(IMAGE_TEMPLATES_KEY).unwrap();
    assert_eq!(records, vec![legacy]);

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn test_saved_template_persists_and_reapplies() {
    let dir = temp_dir("templates");
    let mut session = EditorSession::new(FontBook::approximate(), UVec2::new(800, 600));
    session
        .set_background(RgbaImage::from_pixel(1600, 1200, Rgba([255, 255, 255, 255])))
        .unwrap();
    session
        .add_element("Approved", Vec2::new(400.0, 300.0), TextStyle::default())
        .unwrap();

    let template = session.save_as_template("Approval stamp").unwrap();
    let id = {
        let mut library = TemplateLibrary::open(Box::new(JsonFileStore::new(&dir))).unwrap();
        library.insert(template).unwrap()
    };

    let library = TemplateLibrary::open(Box::new(JsonFileStore::new(&dir))).unwrap();
    let stored = library.get(id).unwrap();
    assert_eq!(stored.element_count(), 1);
    assert_eq!(stored.category, "Custom");

    let mut fresh = EditorSession::new(FontBook::approximate(), UVec2::new(800, 600));
    fresh.apply_template(stored).unwrap();
    assert_eq!(fresh.surface_size(), UVec2::new(800, 600));
    assert!(fresh.elements()[0].same_attributes(&session.elements()[0]));

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn test_empty_template_save_persists_nothing() {
    let dir = temp_dir("empty-save");
    let mut session = EditorSession::new(FontBook::approximate(), UVec2::new(800, 600));
    session
        .set_background(RgbaImage::from_pixel(100, 100, Rgba([0, 0, 0, 255])))
        .unwrap();

    let mut library = TemplateLibrary::open(Box::new(JsonFileStore::new(&dir))).unwrap();
    let result = session.save_as_template("Nothing here");
    assert!(result.as_ref().is_err_and(|e| e.is_validation()));
    if let Ok(template) = result {
        library.insert(template).unwrap();
    }

    assert!(library.is_empty());
    assert!(!dir.join("image_templates.json").exists());
}

// Agreement tests
fn agreements_store() -> MemoryStore {
    MemoryStore::with_records(
        AGREEMENTS_KEY,
        vec![
            json!({"id": "ag-1", "number": "2024-001", "clientId": "c1", "companySignature": "", "clientSignature": ""}),
            json!({"id": 42, "number": 2, "clientId": "c2"}),
        ],
    )
}

#[test]
fn test_attach_signature_writes_slot() {
    let mut store = agreements_store();
    attach_signature(&mut store, "ag-1", SignatureSlot::Client, "data:image/png;base64,AAAA").unwrap();

    let records = store.load(AGREEMENTS_KEY).unwrap();
    assert_eq!(records[0]["clientSignature"], "data:image/png;base64,AAAA");
    assert_eq!(records[0]["companySignature"], "");
    assert_eq!(records[0]["clientId"], "c1");
}

#[test]
fn test_attach_signature_numeric_id() {
    let mut store = agreements_store();
    attach_signature(&mut store, "42", SignatureSlot::Company, "data:image/png;base64,BBBB").unwrap();

    let summaries = list_agreements(&store).unwrap();
    assert!(summaries[1].company_signed);
    assert!(!summaries[1].client_signed);
    assert_eq!(summaries[1].number.as_deref(), Some("2"));
}

#[test]
fn test_attach_signature_unknown_agreement() {
    let mut store = agreements_store();
    let err = attach_signature(&mut store, "missing", SignatureSlot::Company, "data:").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_slot_field_names() {
    assert_eq!(SignatureSlot::Company.field_name(), "companySignature");
    assert_eq!(SignatureSlot::Client.field_name(), "clientSignature");
}

//! Integration tests for the file-backed storage slot.

use chrono::{Local, TimeZone};
use keepsake_core::{MemoryForm, MemoryRecord, codec::build_record, decode_data_url, image};
use keepsake_store::{FileSlotStore, MemoryStore};
use pretty_assertions::assert_eq;
use std::path::Path;

fn record(title: &str, timestamp_offset_secs: u32) -> MemoryRecord {
    let form = MemoryForm {
        name: "Sam".to_string(),
        year: "Junior".to_string(),
        department: "CS".to_string(),
        title: title.to_string(),
        description: "Survived on no sleep all week".to_string(),
        category: "Pain".to_string(),
        emoji: String::new(),
        image_path: None,
    };
    let now = Local
        .with_ymd_and_hms(2024, 5, 1, 12, 0, timestamp_offset_secs)
        .unwrap();
    build_record(&form, None, now)
}

fn store_in(dir: &Path) -> FileSlotStore {
    FileSlotStore::new(dir.join("memories.json")).expect("store")
}

#[tokio::test]
async fn missing_slot_loads_as_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(dir.path());
    let records = store.load_all().await.expect("load");
    assert_eq!(records, Vec::new());
}

#[tokio::test]
async fn malformed_slot_loads_as_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(dir.path());
    std::fs::write(store.path(), "{ not json ]").expect("write");
    let records = store.load_all().await.expect("load");
    assert_eq!(records, Vec::new());
}

#[tokio::test]
async fn appended_records_round_trip_in_insertion_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(dir.path());

    let first = record("Finals Week", 0);
    let second = record("Lab Crash", 1);
    let third = record("Graduation", 2);
    store.append(first.clone()).await.expect("append");
    store.append(second.clone()).await.expect("append");
    store.append(third.clone()).await.expect("append");

    let records = store.load_all().await.expect("load");
    assert_eq!(records, vec![first, second, third]);
}

#[tokio::test]
async fn slot_file_holds_a_single_json_array() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(dir.path());
    store.append(record("Finals Week", 0)).await.expect("append");

    let contents = std::fs::read_to_string(store.path()).expect("read");
    let value: serde_json::Value = serde_json::from_str(&contents).expect("parse");
    let array = value.as_array().expect("array");
    assert_eq!(array.len(), 1);
    assert_eq!(array[0]["title"], serde_json::json!("Finals Week"));
    assert_eq!(array[0]["dateCreated"], serde_json::json!("5/1/2024"));
    assert_eq!(array[0]["image"], serde_json::json!(null));
}

#[tokio::test]
async fn image_payload_survives_persistence_byte_identically() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(dir.path());

    let bytes: Vec<u8> = (0u8..=255).cycle().take(1024).collect();
    let payload = image::encode_data_url(&bytes, "image/png");
    let mut saved = record("Finals Week", 0);
    saved.image = Some(payload);
    store.append(saved).await.expect("append");

    let records = store.load_all().await.expect("load");
    let loaded = records[0].image.as_deref().expect("image");
    assert_eq!(decode_data_url(loaded).expect("decode"), bytes);
}

#[tokio::test]
async fn append_after_corruption_starts_a_fresh_collection() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(dir.path());
    std::fs::write(store.path(), "garbage").expect("write");

    store.append(record("Finals Week", 0)).await.expect("append");
    let records = store.load_all().await.expect("load");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Finals Week");
}

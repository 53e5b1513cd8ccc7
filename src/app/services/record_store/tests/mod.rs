//! Shared test utilities and fixtures for record store tests

use crate::app::models::Contact;
use crate::app::services::record_store::ContactStore;
use crate::config::StoreConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;


pub const HEADER_LINE: &str = "key,name,email,phone\n";

/// Write a contacts file into `dir` and return its path
pub fn write_source(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("contacts.csv");
    fs::write(&path, format!("{}{}", HEADER_LINE, body)).unwrap();
    path
}

/// Open a store over `body`, keeping the temp dir alive alongside it
pub fn open_store(body: &str) -> (TempDir, ContactStore) {
    open_store_with_threshold(body, 1000)
}

pub fn open_store_with_threshold(body: &str, threshold: usize) -> (TempDir, ContactStore) {
    let dir = TempDir::new().unwrap();
    let path = write_source(dir.path(), body);
    let store =
        ContactStore::open(StoreConfig::new(path).with_index_threshold(threshold)).unwrap();
    (dir, store)
}

/// CSV body with `count` valid contacts keyed 1..=count
pub fn generated_body(count: usize) -> String {
    (1..=count)
        .map(|i| {
            format!(
                "{},Person {},person{}@example.com,{:010}\n",
                i,
                i,
                i % 7,
                5550000000u64 + i as u64
            )
        })
        .collect()
}

pub fn contact(key: i64, name: &str) -> Contact {
    Contact::new(
        key,
        name,
        format!("{}@gmail.com", name.to_lowercase().replace(' ', ".")),
        "5551234567",
    )
}

/// Make the backing file unwritable by replacing it with a directory
pub fn break_source(store: &ContactStore) {
    let path = store.source_path().to_path_buf();
    fs::remove_file(&path).unwrap();
    fs::create_dir(&path).unwrap();
}

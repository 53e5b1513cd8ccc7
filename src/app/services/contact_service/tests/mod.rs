//! Shared fixtures for contact service tests

use crate::app::models::ContactPayload;
use crate::app::services::contact_service::ContactService;
use crate::app::services::record_store::ContactStore;
use crate::config::StoreConfig;
use std::sync::Arc;
use tempfile::TempDir;

mod service_tests;

/// Service over a temporary file holding `body` after the header row
pub fn service_with(body: &str) -> (TempDir, ContactService) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("contacts.csv");
    std::fs::write(&path, format!("key,name,email,phone\n{}", body)).unwrap();

    let store = ContactStore::open(StoreConfig::new(path)).unwrap();
    (dir, ContactService::new(Arc::new(store)))
}

pub fn payload(key: i64, name: &str, email: &str, phone: &str) -> ContactPayload {
    ContactPayload {
        key: Some(key),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
    }
}

pub const SAMPLE: &str = "1,Ana,ana@gmail.com,5551234567\n\
                          2,Anabel,anabel@yahoo.com,5559876543\n\
                          3,Bruno,bruno@gmail.com,5550001111\n\
                          4,Carla,carla@hotmail.com,5552223333\n\
                          5,Dario,dario@gmail.com,5554445555\n";

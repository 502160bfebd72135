//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use pricewatch::adapters::{FileStore, InMemoryStore, ReqwestHttpClient};
use pricewatch::traits::API_KEY;
use pricewatch::Session;
use serde_json::{json, Value};

pub const TEST_KEY: &str = "test-api-key-12345";

/// One product as the price service serves it.
pub fn product_json(name: &str, shop: &str, price: i64) -> Value {
    json!({
        "name": name,
        "price": price,
        "previousPrice": {"Int64": 0, "Valid": false},
        "shop": shop,
        "link": format!("https://{}.example.com/{}", shop.to_lowercase(), name.to_lowercase().replace(' ', "-")),
        "lastSeen": "2024-03-01T12:00:00Z",
        "firstSeen": "2024-02-01T08:30:00Z",
        "notified": false
    })
}

pub fn catalog_json() -> Value {
    json!([
        product_json("Lightning Bolt", "Alpha", 150),
        product_json("Counterspell", "Beta", 200),
        product_json("Bolt Ring", "Gamma", 1200),
    ])
}

/// Session over the real reqwest client with in-memory storage.
pub fn memory_session(base_url: &str, stored_key: Option<&str>) -> (InMemoryStore, Session) {
    let storage = match stored_key {
        Some(key) => InMemoryStore::with_entry(API_KEY, key),
        None => InMemoryStore::new(),
    };
    let session = Session::new(
        Arc::new(ReqwestHttpClient::new()),
        Arc::new(storage.clone()),
        base_url,
    );
    (storage, session)
}

/// Session over the real reqwest client and a JSON file store.
pub fn file_session(base_url: &str, store: FileStore) -> Session {
    Session::new(Arc::new(ReqwestHttpClient::new()), Arc::new(store), base_url)
}

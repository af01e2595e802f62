use std::sync::Arc;

use client_logging::{client_error, client_warn};

use crate::store::KeyValueStore;
use crate::types::ClassificationRecord;

/// Fixed key under which the classification history lives.
pub const HISTORY_KEY: &str = "history";

/// Append-only log of classification results, oldest first.
///
/// A missing or unparseable stored value reads as an empty sequence; the
/// next append overwrites it. There are no update or delete operations.
pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
}

impl HistoryStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn read_all(&self) -> Vec<ClassificationRecord> {
        let Some(raw) = self.store.get(HISTORY_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                client_warn!("Discarding unreadable history: {}", err);
                Vec::new()
            }
        }
    }

    pub fn append(&self, record: ClassificationRecord) {
        let mut entries = self.read_all();
        entries.push(record);
        match serde_json::to_string(&entries) {
            Ok(raw) => self.store.set(HISTORY_KEY, &raw),
            Err(err) => client_error!("Failed to serialize history: {}", err),
        }
    }
}

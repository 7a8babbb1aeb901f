//! Process-local blob store.

use super::{Collection, Store, StoreResult};
use std::collections::HashMap;

/// Keeps collection blobs in memory; contents are lost on drop.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: HashMap<Collection, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of collections written so far.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl Store for MemoryStore {
    fn put(&mut self, collection: Collection, payload: &str) -> StoreResult<()> {
        self.blobs.insert(collection, payload.to_string());
        Ok(())
    }

    fn get(&self, collection: Collection) -> StoreResult<Option<String>> {
        Ok(self.blobs.get(&collection).cloned())
    }
}

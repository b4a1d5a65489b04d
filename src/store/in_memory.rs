use std::sync::{Arc, RwLock};

use crate::book::Collection;

use super::{RecordStore, StoreError};

/// In-memory record store backed by `Arc<RwLock<Collection>>`.
///
/// Clone-friendly (cloning shares the same underlying collection). Each
/// `load` hands out a deep copy and each `save` swaps the whole collection
/// under the write lock, so readers never observe a half-applied save.
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    storage: Arc<RwLock<Collection>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `collection`.
    pub fn seeded(collection: Collection) -> Self {
        Self {
            storage: Arc::new(RwLock::new(collection)),
        }
    }
}

impl RecordStore for InMemoryRecordStore {
    fn load(&self) -> Result<Collection, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("collection read"))?;
        Ok(storage.clone())
    }

    fn save(&self, collection: &Collection) -> Result<(), StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("collection write"))?;
        *storage = collection.clone();
        Ok(())
    }
}

//! Storage access for the application engine.

use crate::application_engine::ApplicationEngine;
use crate::error::Result;
use crate::interoperable::Interoperable;
use crate::storage::{StorageItem, StorageKey};

impl ApplicationEngine {
    pub fn get_storage_item(&self, key: &StorageKey) -> Option<StorageItem> {
        self.snapshot().get(key)
    }

    pub fn put_storage_item(&mut self, key: StorageKey, item: StorageItem) -> Result<()> {
        self.snapshot_mut().put(key, item)
    }

    pub fn delete_storage_item(&mut self, key: &StorageKey) -> Result<()> {
        self.snapshot_mut().delete(key)
    }

    /// Reads the record stored at `key`, if any.
    pub fn get_interoperable<T: Interoperable>(&self, key: &StorageKey) -> Result<Option<T>> {
        match self.get_storage_item(key) {
            Some(item) => item.get_interoperable(self.limits()).map(Some),
            None => Ok(None),
        }
    }

    /// Writes `value` at `key`, built under this engine's reference counter.
    pub fn put_interoperable<T: Interoperable>(&mut self, key: StorageKey, value: &T) -> Result<()> {
        let item = StorageItem::from_interoperable(value, self.reference_counter(), self.limits())?;
        self.put_storage_item(key, item)
    }
}

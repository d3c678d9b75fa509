//! Storage snapshots.
//!
//! A snapshot is the mutable view of contract storage owned by one execution.
//! Changes are only visible to that execution until the caller commits it.

use crate::error::{Error, Result};
use crate::storage::{StorageItem, StorageKey};
use std::collections::BTreeMap;
use tracing::trace;

/// Key-value view of contract storage.
pub trait Snapshot: Send {
    /// Returns a copy of the item stored at `key`.
    fn get(&self, key: &StorageKey) -> Option<StorageItem>;

    /// Stores `item` at `key`. Constant items cannot be overwritten.
    fn put(&mut self, key: StorageKey, item: StorageItem) -> Result<()>;

    /// Removes the item at `key`. Constant items cannot be removed.
    fn delete(&mut self, key: &StorageKey) -> Result<()>;

    fn contains(&self, key: &StorageKey) -> bool {
        self.get(key).is_some()
    }
}

/// In-memory snapshot backed by an ordered map.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshot {
    items: BTreeMap<StorageKey, StorageItem>,
}

impl MemorySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Snapshot for MemorySnapshot {
    fn get(&self, key: &StorageKey) -> Option<StorageItem> {
        self.items.get(key).cloned()
    }

    fn put(&mut self, key: StorageKey, item: StorageItem) -> Result<()> {
        if let Some(existing) = self.items.get(&key) {
            if existing.is_constant {
                return Err(Error::StorageError(format!(
                    "Cannot modify constant storage item {key}"
                )));
            }
        }
        trace!(%key, size = item.value.len(), "storage put");
        self.items.insert(key, item);
        Ok(())
    }

    fn delete(&mut self, key: &StorageKey) -> Result<()> {
        match self.items.get(key) {
            Some(existing) if existing.is_constant => Err(Error::StorageError(format!(
                "Cannot delete constant storage item {key}"
            ))),
            Some(_) => {
                trace!(%key, "storage delete");
                self.items.remove(key);
                Ok(())
            }
            None => Ok(()),
        }
    }
}

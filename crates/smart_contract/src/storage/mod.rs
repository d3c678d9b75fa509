//! Storage primitives for native contracts.

pub mod snapshot;
pub mod storage_item;
pub mod storage_key;

pub use snapshot::{MemorySnapshot, Snapshot};
pub use storage_item::StorageItem;
pub use storage_key::StorageKey;

//! Storage keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A storage key scoped to a contract id.
///
/// Native contracts lay out their records as a one-byte prefix followed by
/// the record's own key bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StorageKey {
    /// The id of the owning contract.
    pub id: i32,
    /// The key bytes.
    pub key: Vec<u8>,
}

impl StorageKey {
    /// Creates a new storage key.
    pub fn new(id: i32, key: Vec<u8>) -> Self {
        Self { id, key }
    }

    /// Creates a key that consists of `prefix` only.
    pub fn create(id: i32, prefix: u8) -> Self {
        Self::new(id, vec![prefix])
    }

    /// Creates a key of `prefix` followed by `data`.
    pub fn create_with_bytes(id: i32, prefix: u8, data: &[u8]) -> Self {
        let mut key = Vec::with_capacity(1 + data.len());
        key.push(prefix);
        key.extend_from_slice(data);
        Self::new(id, key)
    }

    pub fn to_hex_string(&self) -> String {
        hex::encode(&self.key)
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.id, self.to_hex_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_with_bytes() {
        let key = StorageKey::create_with_bytes(-2, 20, &[0xAB, 0xCD]);
        assert_eq!(key.key, vec![20, 0xAB, 0xCD]);
        assert_eq!(key.to_string(), "-2:14abcd");
    }

    #[test]
    fn test_ordering_groups_by_id() {
        let a = StorageKey::create(1, 0xFF);
        let b = StorageKey::create(2, 0x00);
        assert!(a < b);
    }

    #[test]
    fn test_json_round_trip() {
        let key = StorageKey::create(7, 11);
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(serde_json::from_str::<StorageKey>(&json).unwrap(), key);
    }
}

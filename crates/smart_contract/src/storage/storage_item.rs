//! Storage items.

use crate::error::{Error, Result};
use crate::interoperable::Interoperable;
use neo_vm::{BinarySerializer, ExecutionEngineLimits, ReferenceCounter};
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

/// A stored value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StorageItem {
    /// The raw bytes.
    pub value: Vec<u8>,
    /// Constant items can be written once and never modified or deleted.
    pub is_constant: bool,
}

impl StorageItem {
    pub fn new(value: Vec<u8>) -> Self {
        Self {
            value,
            is_constant: false,
        }
    }

    pub fn new_constant(value: Vec<u8>) -> Self {
        Self {
            value,
            is_constant: true,
        }
    }

    /// Stores an integer as its signed little-endian bytes.
    pub fn from_big_int(value: &BigInt) -> Self {
        Self::new(value.to_signed_bytes_le())
    }

    /// Reads the value as a signed little-endian integer. Empty is zero.
    pub fn as_big_int(&self) -> BigInt {
        BigInt::from_signed_bytes_le(&self.value)
    }

    /// Serializes a native state record into an item.
    pub fn from_interoperable<T: Interoperable>(
        state: &T,
        reference_counter: &ReferenceCounter,
        limits: &ExecutionEngineLimits,
    ) -> Result<Self> {
        let item = state.to_stack_item(reference_counter)?;
        let value = BinarySerializer::serialize(&item, limits)
            .map_err(|e| Error::StorageError(format!("Failed to serialize state: {e}")))?;
        Ok(Self::new(value))
    }

    /// Deserializes the item into a native state record.
    pub fn get_interoperable<T: Interoperable>(&self, limits: &ExecutionEngineLimits) -> Result<T> {
        let item = BinarySerializer::deserialize(&self.value, limits)
            .map_err(|e| Error::StorageError(format!("Failed to deserialize state: {e}")))?;
        T::from_stack_item(&item)
    }
}

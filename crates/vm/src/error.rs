//! Error types for the Neo Virtual Machine.

use thiserror::Error;

/// Result type for VM operations.
pub type VmResult<T> = Result<T, VmError>;

/// Errors raised by the stack value system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VmError {
    /// A stack item had an unexpected type.
    #[error("Invalid type: {0}")]
    InvalidType(String),

    /// More items were requested than the stack holds.
    #[error("Stack underflow: requested {requested}, available {available}")]
    StackUnderflow {
        /// Number of items requested.
        requested: usize,
        /// Number of items on the stack.
        available: usize,
    },

    /// The shared reference budget would be exceeded.
    #[error("Reference limit exceeded: {requested} references requested, limit is {limit}")]
    ReferenceLimitExceeded {
        /// Total references after the operation.
        requested: usize,
        /// Configured limit.
        limit: usize,
    },

    /// An item is larger than the configured maximum.
    #[error("Item too large: {size} bytes exceeds maximum of {max}")]
    ItemTooLarge {
        /// Actual size.
        size: usize,
        /// Configured maximum.
        max: usize,
    },

    /// The operation is not valid in the current state.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Malformed binary data.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl VmError {
    /// Creates an invalid type error.
    pub fn invalid_type_simple<S: Into<String>>(message: S) -> Self {
        Self::InvalidType(message.into())
    }

    /// Creates an invalid operation error.
    pub fn invalid_operation_msg<S: Into<String>>(message: S) -> Self {
        Self::InvalidOperation(message.into())
    }

    /// Creates a stack underflow error.
    pub fn stack_underflow_msg(requested: usize, available: usize) -> Self {
        Self::StackUnderflow {
            requested,
            available,
        }
    }

    /// Creates a serialization error.
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        Self::Serialization(message.into())
    }
}

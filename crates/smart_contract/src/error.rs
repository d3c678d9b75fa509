//! Error types for native contract execution.
//!
//! Every variant is fatal for the execution that raised it: the engine must
//! abort without committing state. Negative outcomes that merely mean "this
//! call does not apply here" are reported as `Ok(false)` instead.

use crate::trigger_type::TriggerType;
use neo_vm::VmError;
use thiserror::Error;

/// Result type for native contract operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the native contract bridge.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A lifecycle operation ran under a trigger it is not permitted in.
    #[error("{operation} is not permitted under the {actual} trigger (requires {expected})")]
    InvalidPhase {
        /// The rejected operation.
        operation: String,
        /// The trigger the operation requires.
        expected: TriggerType,
        /// The active trigger.
        actual: TriggerType,
    },

    /// A stack item did not have the shape a native type expects.
    #[error("Malformed stack item: {0}")]
    Marshal(String),

    /// An operation would break a state invariant.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// A method name was registered twice, or collides with a reserved name.
    #[error("Duplicate method: {0}")]
    DuplicateMethod(String),

    /// Two native contracts share a service identifier or id.
    #[error("Service collision: {0}")]
    ServiceCollision(String),

    /// A native method received invalid arguments.
    #[error("Native contract error: {0}")]
    NativeContractError(String),

    /// Storage access failed.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// The stack value system rejected an operation.
    #[error("VM error: {0}")]
    Vm(#[from] VmError),
}

impl Error {
    /// Creates a marshalling error.
    pub fn marshal<S: Into<String>>(message: S) -> Self {
        Self::Marshal(message.into())
    }

    /// Creates an invariant violation.
    pub fn invariant<S: Into<String>>(message: S) -> Self {
        Self::InvariantViolation(message.into())
    }

    /// Creates a phase error for `operation`.
    pub fn invalid_phase<S: Into<String>>(
        operation: S,
        expected: TriggerType,
        actual: TriggerType,
    ) -> Self {
        Self::InvalidPhase {
            operation: operation.into(),
            expected,
            actual,
        }
    }
}

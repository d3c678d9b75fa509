//! Execution trigger.

use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;

/// The phase an execution runs in. One trigger is active per engine and it
/// does not change for the lifetime of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TriggerType {
    /// Block-level lifecycle effects applied by the node.
    System = 0x01,
    /// Witness verification.
    Verification = 0x20,
    /// A transaction's script.
    Application = 0x40,
}

impl fmt::Display for TriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerType::System => write!(f, "System"),
            TriggerType::Verification => write!(f, "Verification"),
            TriggerType::Application => write!(f, "Application"),
        }
    }
}

impl TryFrom<u8> for TriggerType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(TriggerType::System),
            0x20 => Ok(TriggerType::Verification),
            0x40 => Ok(TriggerType::Application),
            other => Err(other),
        }
    }
}

//! Script representation for the Neo Virtual Machine.

use crate::interop_service::ServiceHash;
use crate::op_code::OpCode;

/// An immutable VM script.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Script {
    bytes: Vec<u8>,
}

impl Script {
    /// Creates a script from raw bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Returns the script bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the script length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the script is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the service the script declares it calls: the operand of a
    /// leading `SYSCALL` instruction.
    pub fn declared_service_call(&self) -> Option<ServiceHash> {
        match self.bytes.as_slice() {
            [op, a, b, c, d, ..] if *op == OpCode::SYSCALL as u8 => {
                Some(ServiceHash::from_u32(u32::from_le_bytes([*a, *b, *c, *d])))
            }
            _ => None,
        }
    }
}

impl From<Vec<u8>> for Script {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

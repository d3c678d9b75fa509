//! Interop service identifiers.
//!
//! Every service a script can reach through `SYSCALL`, native contracts
//! included, is addressed by a 32-bit hash of its name.

use sha2::{Digest, Sha256};
use std::fmt;

/// Identifier of an interop service: the first four bytes of the SHA-256 of
/// the service name, read little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceHash(u32);

impl ServiceHash {
    /// Computes the identifier of a service name.
    pub fn from_name(name: &str) -> Self {
        let digest = Sha256::digest(name.as_bytes());
        Self(u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]]))
    }

    /// Wraps a raw identifier, e.g. one decoded from a `SYSCALL` operand.
    pub const fn from_u32(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Returns the operand bytes as they appear after `SYSCALL`.
    pub fn to_le_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

impl fmt::Display for ServiceHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

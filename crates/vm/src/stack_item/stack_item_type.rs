//! Stack item type tags.

use std::convert::TryFrom;

/// Type tag of a stack item. The discriminants are the binary type markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StackItemType {
    /// Null.
    Any = 0x00,
    /// Boolean.
    Boolean = 0x20,
    /// Arbitrary-precision integer.
    Integer = 0x21,
    /// Immutable byte string.
    ByteString = 0x28,
    /// Mutable byte buffer.
    Buffer = 0x30,
    /// Array of items.
    Array = 0x40,
    /// Struct of items (value semantics).
    Struct = 0x41,
}

impl StackItemType {
    /// Returns true for types that contain other items.
    pub fn is_compound(self) -> bool {
        matches!(self, StackItemType::Array | StackItemType::Struct)
    }

    /// Returns true for types that hold a single value.
    pub fn is_primitive(self) -> bool {
        matches!(
            self,
            StackItemType::Boolean | StackItemType::Integer | StackItemType::ByteString
        )
    }
}

impl TryFrom<u8> for StackItemType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(StackItemType::Any),
            0x20 => Ok(StackItemType::Boolean),
            0x21 => Ok(StackItemType::Integer),
            0x28 => Ok(StackItemType::ByteString),
            0x30 => Ok(StackItemType::Buffer),
            0x40 => Ok(StackItemType::Array),
            0x41 => Ok(StackItemType::Struct),
            other => Err(other),
        }
    }
}

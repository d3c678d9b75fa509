//! Stack item implementation for the Neo Virtual Machine.
//!
//! Compound items own their children, so a value graph is always a tree and
//! reference cycles cannot be formed.

use crate::error::{VmError, VmResult};
use crate::stack_item::stack_item_type::StackItemType;
use neo_config::MAX_INTEGER_SIZE;
use num_bigint::BigInt;
use num_traits::Zero;

/// Represents a value in the Neo VM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackItem {
    /// Represents a null value.
    Null,

    /// Represents a boolean value.
    Boolean(bool),

    /// Represents an integer value.
    Integer(BigInt),

    /// Represents an immutable byte string.
    ByteString(Vec<u8>),

    /// Represents a mutable byte buffer.
    Buffer(Vec<u8>),

    /// Represents an array of stack items.
    Array(Vec<StackItem>),

    /// Represents a struct of stack items.
    Struct(Vec<StackItem>),
}

impl StackItem {
    /// The True value.
    pub fn true_value() -> Self {
        StackItem::Boolean(true)
    }

    /// The False value.
    pub fn false_value() -> Self {
        StackItem::Boolean(false)
    }

    /// The Null value.
    pub fn null() -> Self {
        StackItem::Null
    }

    /// Creates a boolean stack item.
    pub fn from_bool(value: bool) -> Self {
        StackItem::Boolean(value)
    }

    /// Creates an integer stack item.
    pub fn from_int<T: Into<BigInt>>(value: T) -> Self {
        StackItem::Integer(value.into())
    }

    /// Creates a byte string stack item.
    pub fn from_byte_string<T: Into<Vec<u8>>>(value: T) -> Self {
        StackItem::ByteString(value.into())
    }

    /// Creates a buffer stack item.
    pub fn from_buffer<T: Into<Vec<u8>>>(value: T) -> Self {
        StackItem::Buffer(value.into())
    }

    /// Creates an array stack item.
    pub fn from_array<T: Into<Vec<StackItem>>>(value: T) -> Self {
        StackItem::Array(value.into())
    }

    /// Creates a struct stack item.
    ///
    /// Use [`crate::Struct::new`] when the struct must be charged against a
    /// reference counter.
    pub fn from_struct<T: Into<Vec<StackItem>>>(value: T) -> Self {
        StackItem::Struct(value.into())
    }

    /// Returns the type of the stack item.
    pub fn stack_item_type(&self) -> StackItemType {
        match self {
            StackItem::Null => StackItemType::Any,
            StackItem::Boolean(_) => StackItemType::Boolean,
            StackItem::Integer(_) => StackItemType::Integer,
            StackItem::ByteString(_) => StackItemType::ByteString,
            StackItem::Buffer(_) => StackItemType::Buffer,
            StackItem::Array(_) => StackItemType::Array,
            StackItem::Struct(_) => StackItemType::Struct,
        }
    }

    /// Returns true if the stack item is null.
    pub fn is_null(&self) -> bool {
        matches!(self, StackItem::Null)
    }

    /// Number of references this item accounts for: one for itself plus one
    /// per nested item.
    pub fn reference_weight(&self) -> usize {
        let mut weight = 0;
        let mut pending = vec![self];
        while let Some(item) = pending.pop() {
            weight += 1;
            if let StackItem::Array(items) | StackItem::Struct(items) = item {
                pending.extend(items.iter());
            }
        }
        weight
    }

    /// Converts the stack item to a boolean.
    pub fn as_bool(&self) -> VmResult<bool> {
        match self {
            StackItem::Null => Ok(false),
            StackItem::Boolean(b) => Ok(*b),
            StackItem::Integer(i) => Ok(!i.is_zero()),
            StackItem::ByteString(b) | StackItem::Buffer(b) => {
                if b.len() > MAX_INTEGER_SIZE {
                    return Err(VmError::invalid_type_simple(format!(
                        "Cannot convert {} bytes to Boolean",
                        b.len()
                    )));
                }
                Ok(b.iter().any(|&byte| byte != 0))
            }
            StackItem::Array(_) | StackItem::Struct(_) => Ok(true),
        }
    }

    /// Converts the stack item to an integer.
    ///
    /// Byte strings are read as signed little-endian two's complement. Values
    /// wider than the VM integer size are rejected.
    pub fn as_int(&self) -> VmResult<BigInt> {
        match self {
            StackItem::Boolean(b) => Ok(BigInt::from(u8::from(*b))),
            StackItem::Integer(i) => {
                let size = i.to_signed_bytes_le().len();
                if size > MAX_INTEGER_SIZE {
                    return Err(VmError::invalid_type_simple(format!(
                        "Integer of {size} bytes exceeds {MAX_INTEGER_SIZE}"
                    )));
                }
                Ok(i.clone())
            }
            StackItem::ByteString(b) => {
                if b.len() > MAX_INTEGER_SIZE {
                    return Err(VmError::invalid_type_simple(format!(
                        "Integer of {} bytes exceeds {MAX_INTEGER_SIZE}",
                        b.len()
                    )));
                }
                if b.is_empty() {
                    return Ok(BigInt::zero());
                }
                Ok(BigInt::from_signed_bytes_le(b))
            }
            other => Err(VmError::invalid_type_simple(format!(
                "Cannot convert {:?} to Integer",
                other.stack_item_type()
            ))),
        }
    }

    /// Converts the stack item to a byte array.
    pub fn as_bytes(&self) -> VmResult<Vec<u8>> {
        match self {
            StackItem::Boolean(b) => Ok(vec![u8::from(*b)]),
            StackItem::Integer(i) => {
                if i.is_zero() {
                    Ok(Vec::new())
                } else {
                    Ok(i.to_signed_bytes_le())
                }
            }
            StackItem::ByteString(b) | StackItem::Buffer(b) => Ok(b.clone()),
            other => Err(VmError::invalid_type_simple(format!(
                "Cannot convert {:?} to ByteArray",
                other.stack_item_type()
            ))),
        }
    }

    /// Converts the stack item to a UTF-8 string.
    pub fn as_string(&self) -> VmResult<String> {
        String::from_utf8(self.as_bytes()?)
            .map_err(|_| VmError::invalid_type_simple("Byte string is not valid UTF-8"))
    }

    /// Returns the items of an array or struct.
    pub fn as_array(&self) -> VmResult<&[StackItem]> {
        match self {
            StackItem::Array(a) | StackItem::Struct(a) => Ok(a),
            other => Err(VmError::invalid_type_simple(format!(
                "Cannot convert {:?} to Array",
                other.stack_item_type()
            ))),
        }
    }

    /// Returns the items of a struct. Arrays are rejected.
    pub fn as_struct(&self) -> VmResult<&[StackItem]> {
        match self {
            StackItem::Struct(s) => Ok(s),
            other => Err(VmError::invalid_type_simple(format!(
                "Expected Struct, found {:?}",
                other.stack_item_type()
            ))),
        }
    }
}

impl From<bool> for StackItem {
    fn from(value: bool) -> Self {
        StackItem::Boolean(value)
    }
}

impl From<BigInt> for StackItem {
    fn from(value: BigInt) -> Self {
        StackItem::Integer(value)
    }
}

impl From<&str> for StackItem {
    fn from(value: &str) -> Self {
        StackItem::ByteString(value.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_stack_item() {
        let true_item = StackItem::from_bool(true);
        let false_item = StackItem::from_bool(false);

        assert!(true_item.as_bool().unwrap());
        assert!(!false_item.as_bool().unwrap());
        assert_eq!(true_item.stack_item_type(), StackItemType::Boolean);
        assert_eq!(true_item.as_int().unwrap(), BigInt::from(1));
    }

    #[test]
    fn test_integer_stack_item() {
        let int_item = StackItem::from_int(42);

        assert_eq!(int_item.as_int().unwrap(), BigInt::from(42));
        assert!(int_item.as_bool().unwrap());
        assert_eq!(int_item.stack_item_type(), StackItemType::Integer);

        let zero_item = StackItem::from_int(0);
        assert!(!zero_item.as_bool().unwrap());
        assert!(zero_item.as_bytes().unwrap().is_empty());
    }

    #[test]
    fn test_integer_byte_conversion_is_twos_complement() {
        let negative = StackItem::from_int(-1);
        assert_eq!(negative.as_bytes().unwrap(), vec![0xff]);

        let from_bytes = StackItem::from_byte_string(vec![0x80]);
        assert_eq!(from_bytes.as_int().unwrap(), BigInt::from(-128));

        let positive = StackItem::from_byte_string(vec![0x80, 0x00]);
        assert_eq!(positive.as_int().unwrap(), BigInt::from(128));
    }

    #[test]
    fn test_oversized_integer_is_rejected() {
        let wide = StackItem::from_byte_string(vec![1u8; MAX_INTEGER_SIZE + 1]);
        assert!(wide.as_int().is_err());

        let huge = StackItem::from_int(BigInt::from(1) << 300);
        assert!(huge.as_int().is_err());
    }

    #[test]
    fn test_compound_is_not_an_integer() {
        let item = StackItem::from_struct(vec![StackItem::from_int(1)]);
        assert!(matches!(item.as_int(), Err(VmError::InvalidType(_))));
        assert!(StackItem::Null.as_int().is_err());
    }

    #[test]
    fn test_as_struct_rejects_array() {
        let array = StackItem::from_array(vec![StackItem::from_int(1)]);
        assert!(array.as_struct().is_err());
        assert_eq!(array.as_array().unwrap().len(), 1);

        let structure = StackItem::from_struct(vec![StackItem::from_int(1)]);
        assert_eq!(structure.as_struct().unwrap().len(), 1);
    }

    #[test]
    fn test_as_string() {
        let item = StackItem::from("onPersist");
        assert_eq!(item.as_string().unwrap(), "onPersist");

        let invalid = StackItem::from_byte_string(vec![0xff, 0xfe]);
        assert!(invalid.as_string().is_err());
    }

    #[test]
    fn test_reference_weight() {
        assert_eq!(StackItem::from_int(1).reference_weight(), 1);

        let nested = StackItem::from_struct(vec![
            StackItem::from_int(1),
            StackItem::from_array(vec![StackItem::from_int(2), StackItem::Null]),
        ]);
        assert_eq!(nested.reference_weight(), 5);
    }

    #[test]
    fn test_struct_equality_is_structural() {
        let a = StackItem::from_struct(vec![StackItem::from_int(7)]);
        let b = StackItem::from_struct(vec![StackItem::from_int(7)]);
        let c = StackItem::from_array(vec![StackItem::from_int(7)]);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}

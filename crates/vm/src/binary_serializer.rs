//! Binary serialization of stack items.
//!
//! Layout: a type byte followed by the payload. `Any` has no payload,
//! `Boolean` one byte, `Integer` the var-bytes of its signed little-endian
//! form, `ByteString` and `Buffer` their var-bytes, `Array` and `Struct` a
//! var-int count followed by the items.

use crate::error::{VmError, VmResult};
use crate::execution_engine_limits::ExecutionEngineLimits;
use crate::stack_item::{StackItem, StackItemType};
use num_bigint::BigInt;
use num_traits::Zero;
use std::convert::TryFrom;

/// Serializes stack items to and from their storage encoding.
pub struct BinarySerializer;

impl BinarySerializer {
    /// Serializes `item`. Fails if the output would exceed `max_item_size`.
    pub fn serialize(item: &StackItem, limits: &ExecutionEngineLimits) -> VmResult<Vec<u8>> {
        let mut writer = Vec::new();
        Self::write_item(item, &mut writer, limits)?;
        Ok(writer)
    }

    /// Deserializes a single item that must span all of `data`.
    pub fn deserialize(data: &[u8], limits: &ExecutionEngineLimits) -> VmResult<StackItem> {
        let mut reader = Reader::new(data);
        let mut remaining_items = limits.max_stack_size;
        let item = Self::read_item(&mut reader, limits, &mut remaining_items)?;
        if !reader.is_at_end() {
            log::trace!("rejecting serialized item with {} trailing bytes", reader.remaining());
            return Err(VmError::serialization("Trailing bytes after stack item"));
        }
        Ok(item)
    }

    fn write_item(
        item: &StackItem,
        writer: &mut Vec<u8>,
        limits: &ExecutionEngineLimits,
    ) -> VmResult<()> {
        writer.push(item.stack_item_type() as u8);
        match item {
            StackItem::Null => {}
            StackItem::Boolean(b) => writer.push(u8::from(*b)),
            StackItem::Integer(i) => {
                let bytes = if i.is_zero() {
                    Vec::new()
                } else {
                    i.to_signed_bytes_le()
                };
                if bytes.len() > limits.max_integer_size {
                    return Err(VmError::serialization(format!(
                        "Integer of {} bytes exceeds maximum {}",
                        bytes.len(),
                        limits.max_integer_size
                    )));
                }
                write_var_bytes(writer, &bytes);
            }
            StackItem::ByteString(b) | StackItem::Buffer(b) => write_var_bytes(writer, b),
            StackItem::Array(items) | StackItem::Struct(items) => {
                write_var_int(writer, items.len() as u64);
                for child in items {
                    Self::write_item(child, writer, limits)?;
                }
            }
        }
        if writer.len() > limits.max_item_size {
            return Err(VmError::ItemTooLarge {
                size: writer.len(),
                max: limits.max_item_size,
            });
        }
        Ok(())
    }

    fn read_item(
        reader: &mut Reader<'_>,
        limits: &ExecutionEngineLimits,
        remaining_items: &mut usize,
    ) -> VmResult<StackItem> {
        if *remaining_items == 0 {
            return Err(VmError::serialization(format!(
                "More than {} items in serialized data",
                limits.max_stack_size
            )));
        }
        *remaining_items -= 1;

        let marker = reader.read_u8()?;
        let item_type = StackItemType::try_from(marker)
            .map_err(|b| VmError::serialization(format!("Invalid stack item type 0x{b:02x}")))?;

        let item = match item_type {
            StackItemType::Any => StackItem::Null,
            StackItemType::Boolean => match reader.read_u8()? {
                0 => StackItem::Boolean(false),
                1 => StackItem::Boolean(true),
                other => {
                    return Err(VmError::serialization(format!(
                        "Invalid boolean byte 0x{other:02x}"
                    )))
                }
            },
            StackItemType::Integer => {
                let bytes = reader.read_var_bytes(limits.max_integer_size)?;
                StackItem::Integer(BigInt::from_signed_bytes_le(bytes))
            }
            StackItemType::ByteString => {
                StackItem::ByteString(reader.read_var_bytes(limits.max_item_size)?.to_vec())
            }
            StackItemType::Buffer => {
                StackItem::Buffer(reader.read_var_bytes(limits.max_item_size)?.to_vec())
            }
            StackItemType::Array | StackItemType::Struct => {
                let count = reader.read_var_int(*remaining_items as u64)? as usize;
                let mut items = Vec::with_capacity(count);
                for _ in 0..count {
                    items.push(Self::read_item(reader, limits, remaining_items)?);
                }
                if item_type == StackItemType::Array {
                    StackItem::Array(items)
                } else {
                    StackItem::Struct(items)
                }
            }
        };
        Ok(item)
    }
}

fn write_var_int(writer: &mut Vec<u8>, value: u64) {
    if value < 0xFD {
        writer.push(value as u8);
    } else if value <= 0xFFFF {
        writer.push(0xFD);
        writer.extend_from_slice(&(value as u16).to_le_bytes());
    } else if value <= 0xFFFF_FFFF {
        writer.push(0xFE);
        writer.extend_from_slice(&(value as u32).to_le_bytes());
    } else {
        writer.push(0xFF);
        writer.extend_from_slice(&value.to_le_bytes());
    }
}

fn write_var_bytes(writer: &mut Vec<u8>, bytes: &[u8]) {
    write_var_int(writer, bytes.len() as u64);
    writer.extend_from_slice(bytes);
}

struct Reader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    fn is_at_end(&self) -> bool {
        self.position == self.data.len()
    }

    fn read_bytes(&mut self, count: usize) -> VmResult<&'a [u8]> {
        if count > self.remaining() {
            return Err(VmError::serialization(format!(
                "Unexpected end of data: need {count} bytes, have {}",
                self.remaining()
            )));
        }
        let bytes = &self.data[self.position..self.position + count];
        self.position += count;
        Ok(bytes)
    }

    fn read_u8(&mut self) -> VmResult<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    fn read_var_int(&mut self, max: u64) -> VmResult<u64> {
        let value = match self.read_u8()? {
            0xFD => {
                let b = self.read_bytes(2)?;
                u64::from(u16::from_le_bytes([b[0], b[1]]))
            }
            0xFE => {
                let b = self.read_bytes(4)?;
                u64::from(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            }
            0xFF => {
                let b = self.read_bytes(8)?;
                u64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]])
            }
            small => u64::from(small),
        };
        if value > max {
            return Err(VmError::serialization(format!(
                "Length {value} exceeds maximum {max}"
            )));
        }
        Ok(value)
    }

    fn read_var_bytes(&mut self, max: usize) -> VmResult<&'a [u8]> {
        let len = self.read_var_int(max as u64)? as usize;
        self.read_bytes(len)
    }
}

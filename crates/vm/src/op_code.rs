//! OpCode definitions for the Neo Virtual Machine.
//!
//! Only the opcodes needed to build and inspect native-contract call scripts
//! are listed here; the interpreter loop lives outside this crate.

use std::convert::TryFrom;

/// VM instruction opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    PUSH0 = 0x10,
    PUSH1 = 0x11,
    NOP = 0x21,
    RET = 0x40,
    SYSCALL = 0x41,
}

impl TryFrom<u8> for OpCode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x10 => Ok(OpCode::PUSH0),
            0x11 => Ok(OpCode::PUSH1),
            0x21 => Ok(OpCode::NOP),
            0x40 => Ok(OpCode::RET),
            0x41 => Ok(OpCode::SYSCALL),
            other => Err(other),
        }
    }
}

//! Script builder module for the Neo Virtual Machine.
//!
//! This module provides a way to programmatically construct scripts for the Neo VM.

use crate::interop_service::ServiceHash;
use crate::op_code::OpCode;
use crate::script::Script;

/// Helps construct VM scripts programmatically.
#[derive(Debug, Default)]
pub struct ScriptBuilder {
    /// The script being built
    script: Vec<u8>,
}

impl ScriptBuilder {
    /// Creates a new script builder.
    pub fn new() -> Self {
        Self { script: Vec::new() }
    }

    /// Emits an opcode to the script.
    pub fn emit_opcode(&mut self, op: OpCode) -> &mut Self {
        self.script.push(op as u8);
        self
    }

    /// Emits a call to an interop service.
    pub fn emit_syscall(&mut self, service: ServiceHash) -> &mut Self {
        self.emit_opcode(OpCode::SYSCALL);
        self.script.extend_from_slice(&service.to_le_bytes());
        self
    }

    /// Returns the length of the script built so far.
    pub fn len(&self) -> usize {
        self.script.len()
    }

    /// Returns true if nothing has been emitted.
    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }

    /// Returns a copy of the script bytes.
    pub fn to_array(&self) -> Vec<u8> {
        self.script.clone()
    }

    /// Consumes the builder and returns the script.
    pub fn into_script(self) -> Script {
        Script::new(self.script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_syscall() {
        let hash = ServiceHash::from_name("test");
        let mut sb = ScriptBuilder::new();
        sb.emit_syscall(hash);

        let bytes = sb.to_array();
        assert_eq!(bytes[0], OpCode::SYSCALL as u8);
        assert_eq!(&bytes[1..], &hash.to_le_bytes());
        assert_eq!(sb.into_script().declared_service_call(), Some(hash));
    }

    #[test]
    fn test_opcode_before_syscall_hides_declared_call() {
        let mut sb = ScriptBuilder::new();
        sb.emit_opcode(OpCode::NOP)
            .emit_syscall(ServiceHash::from_name("test"));
        assert_eq!(sb.into_script().declared_service_call(), None);
    }
}

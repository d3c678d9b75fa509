//! Execution context module for the Neo Virtual Machine.
//!
//! This module provides the execution context implementation for the Neo VM.

use crate::evaluation_stack::EvaluationStack;
use crate::interop_service::ServiceHash;
use crate::reference_counter::ReferenceCounter;
use crate::script::Script;
use std::sync::Arc;

/// A loaded script together with its evaluation stack.
#[derive(Debug)]
pub struct ExecutionContext {
    script: Arc<Script>,
    evaluation_stack: EvaluationStack,
}

impl ExecutionContext {
    /// Creates a context whose evaluation stack shares `reference_counter`.
    pub fn new(script: Script, reference_counter: &ReferenceCounter) -> Self {
        Self {
            script: Arc::new(script),
            evaluation_stack: EvaluationStack::new(reference_counter.clone()),
        }
    }

    /// Returns the loaded script.
    pub fn script(&self) -> &Script {
        &self.script
    }

    /// Returns the service the loaded script declares it calls.
    pub fn declared_service_call(&self) -> Option<ServiceHash> {
        self.script.declared_service_call()
    }

    pub fn evaluation_stack(&self) -> &EvaluationStack {
        &self.evaluation_stack
    }

    pub fn evaluation_stack_mut(&mut self) -> &mut EvaluationStack {
        &mut self.evaluation_stack
    }
}

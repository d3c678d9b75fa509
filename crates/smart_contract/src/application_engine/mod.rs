//! Application engine.
//!
//! The execution environment native contracts run in: the active trigger,
//! the invocation stack of loaded contexts, the storage snapshot and the
//! reference counter shared by every stack of the execution.

pub mod storage;

use crate::error::{Error, Result};
use crate::storage::Snapshot;
use crate::trigger_type::TriggerType;
use neo_vm::{
    EvaluationStack, ExecutionContext, ExecutionEngineLimits, ReferenceCounter, Script,
    ServiceHash, VmError,
};
use tracing::trace;

/// The execution a native contract call happens in.
pub struct ApplicationEngine {
    trigger: TriggerType,
    snapshot: Box<dyn Snapshot>,
    limits: ExecutionEngineLimits,
    reference_counter: ReferenceCounter,
    invocation_stack: Vec<ExecutionContext>,
    result_stack: EvaluationStack,
}

impl ApplicationEngine {
    /// Creates an engine with the default limits.
    pub fn new(trigger: TriggerType, snapshot: Box<dyn Snapshot>) -> Self {
        Self::with_limits(trigger, snapshot, ExecutionEngineLimits::default())
    }

    /// Creates an engine whose reference counter enforces
    /// `limits.max_stack_size`.
    pub fn with_limits(
        trigger: TriggerType,
        snapshot: Box<dyn Snapshot>,
        limits: ExecutionEngineLimits,
    ) -> Self {
        let reference_counter = ReferenceCounter::with_limit(limits.max_stack_size);
        let result_stack = EvaluationStack::new(reference_counter.clone());
        Self {
            trigger,
            snapshot,
            limits,
            reference_counter,
            invocation_stack: Vec::new(),
            result_stack,
        }
    }

    /// The trigger this engine runs under. Fixed for the engine's lifetime.
    pub fn trigger(&self) -> TriggerType {
        self.trigger
    }

    pub fn limits(&self) -> &ExecutionEngineLimits {
        &self.limits
    }

    pub fn reference_counter(&self) -> &ReferenceCounter {
        &self.reference_counter
    }

    pub fn snapshot(&self) -> &dyn Snapshot {
        self.snapshot.as_ref()
    }

    pub fn snapshot_mut(&mut self) -> &mut dyn Snapshot {
        self.snapshot.as_mut()
    }

    /// Consumes the engine and hands back its snapshot for committing.
    pub fn into_snapshot(self) -> Box<dyn Snapshot> {
        self.snapshot
    }

    /// Pushes a new context for `script` onto the invocation stack.
    pub fn load_script(&mut self, script: Script) -> Result<&mut ExecutionContext> {
        if self.invocation_stack.len() >= self.limits.max_invocation_stack_size {
            return Err(Error::Vm(VmError::invalid_operation_msg(format!(
                "Invocation stack exceeds {} contexts",
                self.limits.max_invocation_stack_size
            ))));
        }
        trace!(depth = self.invocation_stack.len() + 1, "loading script");
        self.invocation_stack
            .push(ExecutionContext::new(script, &self.reference_counter));
        let depth = self.invocation_stack.len();
        Ok(&mut self.invocation_stack[depth - 1])
    }

    /// Pops the current context. Items left on its evaluation stack are
    /// released from the reference counter.
    pub fn unload_context(&mut self) -> Option<ExecutionContext> {
        self.invocation_stack.pop()
    }

    pub fn invocation_depth(&self) -> usize {
        self.invocation_stack.len()
    }

    /// The topmost context of the invocation stack.
    pub fn current_context(&self) -> Option<&ExecutionContext> {
        self.invocation_stack.last()
    }

    pub fn current_context_mut(&mut self) -> Option<&mut ExecutionContext> {
        self.invocation_stack.last_mut()
    }

    /// The service identifier the current context's script declares it
    /// calls, if there is a current context and it declares one.
    pub fn current_service_call(&self) -> Option<ServiceHash> {
        self.current_context()
            .and_then(ExecutionContext::declared_service_call)
    }

    /// The evaluation stack of the current context.
    pub fn evaluation_stack_mut(&mut self) -> Result<&mut EvaluationStack> {
        self.current_context_mut()
            .map(ExecutionContext::evaluation_stack_mut)
            .ok_or_else(|| {
                Error::Vm(VmError::invalid_operation_msg(
                    "No execution context is loaded",
                ))
            })
    }

    /// Values handed back to the caller once execution finishes.
    pub fn result_stack(&self) -> &EvaluationStack {
        &self.result_stack
    }

    pub fn result_stack_mut(&mut self) -> &mut EvaluationStack {
        &mut self.result_stack
    }
}

impl std::fmt::Debug for ApplicationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplicationEngine")
            .field("trigger", &self.trigger)
            .field("invocation_depth", &self.invocation_stack.len())
            .field("references", &self.reference_counter.count())
            .field("result_stack", &self.result_stack.len())
            .finish()
    }
}

//! # Neo Virtual Machine (NeoVM) stack value system
//!
//! The parts of the Neo Virtual Machine that native contracts run against:
//! the typed stack value model, the per-execution reference counter, the
//! evaluation stack, execution contexts and the binary layout used to store
//! stack values.
//!
//! ## Architecture
//!
//! - **StackItem**: Polymorphic data types for VM values
//! - **ReferenceCounter**: Shared budget bounding the live references of one execution
//! - **EvaluationStack**: Last-in-first-out stack of values for one context
//! - **ExecutionContext**: A loaded script together with its evaluation stack
//! - **BinarySerializer**: Storage encoding of stack values
//! - **ScriptBuilder**: Utility for constructing VM scripts
//!
//! ## Example
//!
//! ```rust
//! use neo_vm::{EvaluationStack, ReferenceCounter, StackItem};
//!
//! let reference_counter = ReferenceCounter::new();
//! let mut stack = EvaluationStack::new(reference_counter.clone());
//! stack.push(StackItem::from_int(42)).unwrap();
//! assert_eq!(reference_counter.count(), 1);
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

/// Storage encoding of stack values
pub mod binary_serializer;
/// VM error types and result handling
pub mod error;
/// Type-safe evaluation stack implementation
pub mod evaluation_stack;
/// Script execution context
pub mod execution_context;
/// Resource limits of one execution
pub mod execution_engine_limits;
/// Interop service identifiers
pub mod interop_service;
/// VM opcode definitions
pub mod op_code;
/// Shared reference budget for stack values
pub mod reference_counter;
/// VM script representation
pub mod script;
/// Utility for constructing VM bytecode
pub mod script_builder;
/// Polymorphic data types for VM values
pub mod stack_item;

pub use binary_serializer::BinarySerializer;
pub use error::{VmError, VmResult};
pub use evaluation_stack::EvaluationStack;
pub use execution_context::ExecutionContext;
pub use execution_engine_limits::ExecutionEngineLimits;
pub use interop_service::ServiceHash;
pub use op_code::OpCode;
pub use reference_counter::ReferenceCounter;
pub use script::Script;
pub use script_builder::ScriptBuilder;
pub use stack_item::{StackItem, StackItemType, Struct};

//! Stack item module for the Neo Virtual Machine.
//!
//! This module provides the stack item types used in the Neo VM.

#[allow(clippy::module_inception)]
pub mod stack_item; // allow module inception for clarity of type name
pub mod stack_item_type;
pub mod struct_item;

pub use stack_item::StackItem;
pub use stack_item_type::StackItemType;
pub use struct_item::Struct;

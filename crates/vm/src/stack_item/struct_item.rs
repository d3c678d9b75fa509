//! Struct stack item implementation for the Neo Virtual Machine.
//!
//! This module provides the Struct builder used when native code creates a
//! struct under an execution's reference counter.

use crate::error::VmResult;
use crate::reference_counter::ReferenceCounter;
use crate::stack_item::stack_item_type::StackItemType;
use crate::stack_item::StackItem;

/// Represents a struct of stack items in the VM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Struct {
    /// The items in the struct.
    items: Vec<StackItem>,
}

impl Struct {
    /// Creates a new struct with the specified items, checked against the
    /// remaining budget of `reference_counter`.
    pub fn new(items: Vec<StackItem>, reference_counter: &ReferenceCounter) -> VmResult<Self> {
        let weight = 1 + items.iter().map(StackItem::reference_weight).sum::<usize>();
        reference_counter.check_budget(weight)?;
        Ok(Self { items })
    }

    /// Gets the items in the struct.
    pub fn items(&self) -> &[StackItem] {
        &self.items
    }

    /// Gets the number of items in the struct.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the struct is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Gets the type of the stack item.
    pub fn stack_item_type(&self) -> StackItemType {
        StackItemType::Struct
    }
}

impl From<Struct> for StackItem {
    fn from(value: Struct) -> Self {
        StackItem::Struct(value.items)
    }
}

//! Evaluation stack module for the Neo Virtual Machine.
//!
//! This module represents a stack used by the Neo VM for executing scripts.

use crate::error::{VmError, VmResult};
use crate::reference_counter::ReferenceCounter;
use crate::stack_item::StackItem;

/// Represents the evaluation stack in the VM.
#[derive(Debug)]
pub struct EvaluationStack {
    /// The underlying stack storage
    stack: Vec<StackItem>,

    /// The reference counter for managing object lifetimes
    reference_counter: ReferenceCounter,
}

impl EvaluationStack {
    /// Creates a new evaluation stack with the specified reference counter.
    pub fn new(reference_counter: ReferenceCounter) -> Self {
        Self {
            stack: Vec::new(),
            reference_counter,
        }
    }

    /// Returns the reference counter for this evaluation stack.
    pub fn reference_counter(&self) -> &ReferenceCounter {
        &self.reference_counter
    }

    /// Pushes an item onto the stack.
    pub fn push(&mut self, item: StackItem) -> VmResult<()> {
        self.reference_counter.add_stack_reference(&item)?;
        self.stack.push(item);
        Ok(())
    }

    /// Pops an item from the stack.
    pub fn pop(&mut self) -> VmResult<StackItem> {
        match self.stack.pop() {
            Some(item) => {
                self.reference_counter.remove_stack_reference(&item);
                Ok(item)
            }
            None => Err(VmError::stack_underflow_msg(1, 0)),
        }
    }

    /// Returns the item `n` positions below the top without removing it.
    pub fn peek(&self, n: usize) -> VmResult<&StackItem> {
        if n >= self.stack.len() {
            return Err(VmError::stack_underflow_msg(n + 1, self.stack.len()));
        }
        Ok(&self.stack[self.stack.len() - 1 - n])
    }

    /// Returns the number of items on the stack.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Returns true if the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Clears the stack.
    pub fn clear(&mut self) {
        for item in &self.stack {
            self.reference_counter.remove_stack_reference(item);
        }

        self.stack.clear();
    }

    /// Returns an iterator over the items from bottom to top.
    pub fn iter(&self) -> std::slice::Iter<'_, StackItem> {
        self.stack.iter()
    }
}

impl Drop for EvaluationStack {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop() {
        let reference_counter = ReferenceCounter::new();
        let mut stack = EvaluationStack::new(reference_counter.clone());

        stack.push(StackItem::from_int(1)).unwrap();
        stack.push(StackItem::from_int(2)).unwrap();
        assert_eq!(stack.len(), 2);
        assert_eq!(reference_counter.count(), 2);

        assert_eq!(stack.pop().unwrap(), StackItem::from_int(2));
        assert_eq!(stack.pop().unwrap(), StackItem::from_int(1));
        assert!(stack.is_empty());
        assert_eq!(reference_counter.count(), 0);
    }

    #[test]
    fn test_pop_empty() {
        let mut stack = EvaluationStack::new(ReferenceCounter::new());
        assert_eq!(stack.pop(), Err(VmError::stack_underflow_msg(1, 0)));
    }

    #[test]
    fn test_peek() {
        let mut stack = EvaluationStack::new(ReferenceCounter::new());
        stack.push(StackItem::from_int(1)).unwrap();
        stack.push(StackItem::from_int(2)).unwrap();

        assert_eq!(stack.peek(0).unwrap(), &StackItem::from_int(2));
        assert_eq!(stack.peek(1).unwrap(), &StackItem::from_int(1));
        assert!(stack.peek(2).is_err());
    }

    #[test]
    fn test_push_over_limit_leaves_stack_untouched() {
        let reference_counter = ReferenceCounter::with_limit(2);
        let mut stack = EvaluationStack::new(reference_counter.clone());

        let item = StackItem::from_array(vec![StackItem::from_int(1), StackItem::from_int(2)]);
        assert!(stack.push(item).is_err());
        assert!(stack.is_empty());
        assert_eq!(reference_counter.count(), 0);
    }

    #[test]
    fn test_drop_releases_references() {
        let reference_counter = ReferenceCounter::new();
        {
            let mut stack = EvaluationStack::new(reference_counter.clone());
            stack
                .push(StackItem::from_struct(vec![StackItem::from_int(1)]))
                .unwrap();
            assert_eq!(reference_counter.count(), 2);
        }
        assert_eq!(reference_counter.count(), 0);
    }
}

//! Reference counter for the Neo Virtual Machine.
//!
//! One counter is shared by every evaluation stack of an execution. It holds
//! the number of references currently alive on those stacks and rejects any
//! operation that would push the total past the configured limit.

use crate::error::{VmError, VmResult};
use crate::stack_item::StackItem;
use neo_config::MAX_STACK_SIZE;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug)]
struct CounterState {
    references: AtomicUsize,
    limit: usize,
}

/// Shared reference budget of one execution.
///
/// Cloning the counter yields another handle to the same budget.
#[derive(Debug, Clone)]
pub struct ReferenceCounter {
    state: Arc<CounterState>,
}

impl ReferenceCounter {
    /// Creates a counter with the default stack size limit.
    pub fn new() -> Self {
        Self::with_limit(MAX_STACK_SIZE)
    }

    /// Creates a counter with the given limit.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            state: Arc::new(CounterState {
                references: AtomicUsize::new(0),
                limit,
            }),
        }
    }

    /// Number of references currently alive.
    pub fn count(&self) -> usize {
        self.state.references.load(Ordering::Acquire)
    }

    /// Maximum number of references.
    pub fn limit(&self) -> usize {
        self.state.limit
    }

    /// Returns true when both handles refer to the same budget.
    pub fn same_counter(&self, other: &ReferenceCounter) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    /// Checks that `additional` references fit in the remaining budget
    /// without charging them.
    pub fn check_budget(&self, additional: usize) -> VmResult<()> {
        let requested = self.count().saturating_add(additional);
        if requested > self.state.limit {
            log::trace!(
                "reference budget check failed: {} requested, limit {}",
                requested,
                self.state.limit
            );
            return Err(VmError::ReferenceLimitExceeded {
                requested,
                limit: self.state.limit,
            });
        }
        Ok(())
    }

    /// Charges the references held by `item` when it is placed on a stack.
    pub fn add_stack_reference(&self, item: &StackItem) -> VmResult<()> {
        let weight = item.reference_weight();
        let limit = self.state.limit;
        self.state
            .references
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                current.checked_add(weight).filter(|total| *total <= limit)
            })
            .map(|_| ())
            .map_err(|current| {
                log::trace!(
                    "reference limit hit: {} live, {} requested, limit {}",
                    current,
                    weight,
                    limit
                );
                VmError::ReferenceLimitExceeded {
                    requested: current.saturating_add(weight),
                    limit,
                }
            })
    }

    /// Releases the references held by `item` when it leaves a stack.
    pub fn remove_stack_reference(&self, item: &StackItem) {
        let weight = item.reference_weight();
        // The closure always returns Some, so the update cannot fail.
        let _ = self
            .state
            .references
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                Some(current.saturating_sub(weight))
            });
    }
}

impl Default for ReferenceCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove() {
        let counter = ReferenceCounter::new();
        let item = StackItem::from_struct(vec![StackItem::from_int(1), StackItem::from_int(2)]);

        counter.add_stack_reference(&item).unwrap();
        assert_eq!(counter.count(), 3);

        counter.remove_stack_reference(&item);
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_limit_is_enforced() {
        let counter = ReferenceCounter::with_limit(2);
        let item = StackItem::from_struct(vec![StackItem::from_int(1), StackItem::from_int(2)]);

        let result = counter.add_stack_reference(&item);
        assert_eq!(
            result,
            Err(VmError::ReferenceLimitExceeded {
                requested: 3,
                limit: 2
            })
        );
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_clones_share_budget() {
        let counter = ReferenceCounter::with_limit(4);
        let handle = counter.clone();

        handle.add_stack_reference(&StackItem::from_int(1)).unwrap();
        assert_eq!(counter.count(), 1);
        assert!(counter.same_counter(&handle));
        assert!(!counter.same_counter(&ReferenceCounter::new()));
    }

    #[test]
    fn test_check_budget_does_not_charge() {
        let counter = ReferenceCounter::with_limit(3);
        counter.check_budget(3).unwrap();
        assert_eq!(counter.count(), 0);
        assert!(counter.check_budget(4).is_err());
    }

    #[test]
    fn test_remove_never_underflows() {
        let counter = ReferenceCounter::new();
        counter.remove_stack_reference(&StackItem::from_int(1));
        assert_eq!(counter.count(), 0);
    }
}

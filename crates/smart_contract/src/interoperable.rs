//! Conversion of native records to and from stack items.

use crate::error::Result;
use neo_vm::{ReferenceCounter, StackItem};

/// A native type that can cross the VM value boundary.
///
/// `from_stack_item` must reject malformed input with
/// [`Error::Marshal`](crate::Error::Marshal) instead of panicking, and
/// `to_stack_item` must build compound items under the given counter so they
/// are accounted to the execution that will hold them.
pub trait Interoperable: Sized {
    /// Populates a value from a stack item.
    fn from_stack_item(item: &StackItem) -> Result<Self>;

    /// Converts the value into a stack item.
    fn to_stack_item(&self, reference_counter: &ReferenceCounter) -> Result<StackItem>;
}

//! Per-account token state.

use crate::error::{Error, Result};
use crate::interoperable::Interoperable;
use neo_config::MAX_INTEGER_SIZE;
use neo_vm::{ReferenceCounter, StackItem, Struct};
use num_bigint::BigInt;

/// The state a token keeps for one account. On the stack it is a one-field
/// struct holding the balance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccountState {
    pub balance: BigInt,
}

impl AccountState {
    /// Number of struct fields in the stack representation.
    pub const FIELD_COUNT: usize = 1;

    pub fn new(balance: BigInt) -> Self {
        Self { balance }
    }
}

impl Interoperable for AccountState {
    fn from_stack_item(item: &StackItem) -> Result<Self> {
        let fields = item
            .as_struct()
            .map_err(|e| Error::marshal(format!("AccountState: {e}")))?;
        if fields.len() != Self::FIELD_COUNT {
            return Err(Error::marshal(format!(
                "AccountState expects {} field, found {}",
                Self::FIELD_COUNT,
                fields.len()
            )));
        }
        let balance = fields[0]
            .as_int()
            .map_err(|e| Error::marshal(format!("AccountState balance: {e}")))?;
        Ok(Self { balance })
    }

    fn to_stack_item(&self, reference_counter: &ReferenceCounter) -> Result<StackItem> {
        let width = self.balance.to_signed_bytes_le().len();
        if width > MAX_INTEGER_SIZE {
            return Err(Error::marshal(format!(
                "AccountState balance of {width} bytes exceeds {MAX_INTEGER_SIZE}"
            )));
        }
        let fields = vec![StackItem::Integer(self.balance.clone())];
        Ok(Struct::new(fields, reference_counter)?.into())
    }
}

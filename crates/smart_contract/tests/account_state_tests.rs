//! Account state marshalling tests.

use neo_config::MAX_INTEGER_SIZE;
use neo_smart_contract::native::AccountState;
use neo_smart_contract::{Error, Interoperable, StorageItem};
use neo_vm::{ExecutionEngineLimits, ReferenceCounter, StackItem};
use num_bigint::BigInt;
use proptest::prelude::*;

#[test]
fn test_from_stack_item() {
    let item = StackItem::from_struct(vec![StackItem::from_int(100)]);
    let state = AccountState::from_stack_item(&item).unwrap();
    assert_eq!(state.balance, BigInt::from(100));
}

#[test]
fn test_to_stack_item() {
    let counter = ReferenceCounter::new();
    let state = AccountState::new(BigInt::from(100));
    let item = state.to_stack_item(&counter).unwrap();

    let fields = item.as_struct().unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].as_int().unwrap(), BigInt::from(100));
}

#[test]
fn test_rejects_non_struct() {
    for item in [
        StackItem::null(),
        StackItem::from_int(1),
        StackItem::from_byte_string(vec![1]),
        StackItem::from_array(vec![StackItem::from_int(1)]),
    ] {
        assert!(
            matches!(AccountState::from_stack_item(&item), Err(Error::Marshal(_))),
            "{item:?} should be rejected"
        );
    }
}

#[test]
fn test_rejects_wrong_arity() {
    let empty = StackItem::from_struct(Vec::new());
    assert!(matches!(
        AccountState::from_stack_item(&empty),
        Err(Error::Marshal(_))
    ));

    let two = StackItem::from_struct(vec![StackItem::from_int(1), StackItem::from_int(2)]);
    assert!(matches!(
        AccountState::from_stack_item(&two),
        Err(Error::Marshal(_))
    ));
}

#[test]
fn test_rejects_non_numeric_balance() {
    for field in [
        StackItem::null(),
        StackItem::from_struct(vec![StackItem::from_int(1)]),
        StackItem::from_byte_string(vec![0xFF; 33]),
    ] {
        let item = StackItem::from_struct(vec![field]);
        assert!(matches!(
            AccountState::from_stack_item(&item),
            Err(Error::Marshal(_))
        ));
    }
}

fn balance_from_bytes(max_len: usize) -> impl Strategy<Value = BigInt> {
    proptest::collection::vec(any::<u8>(), 0..=max_len)
        .prop_map(|bytes| BigInt::from_signed_bytes_le(&bytes))
}

proptest! {
    #[test]
    fn test_round_trip(balance in balance_from_bytes(MAX_INTEGER_SIZE)) {
        let counter = ReferenceCounter::new();
        let state = AccountState::new(balance);
        let item = state.to_stack_item(&counter).unwrap();
        prop_assert_eq!(AccountState::from_stack_item(&item).unwrap(), state);
    }

    #[test]
    fn test_wide_balances_fail_on_encode(balance in balance_from_bytes(MAX_INTEGER_SIZE + 8)) {
        let counter = ReferenceCounter::new();
        let state = AccountState::new(balance);
        let fits = state.balance.to_signed_bytes_le().len() <= MAX_INTEGER_SIZE;
        match state.to_stack_item(&counter) {
            Ok(item) => {
                prop_assert!(fits);
                prop_assert_eq!(AccountState::from_stack_item(&item).unwrap(), state);
            }
            Err(e) => {
                prop_assert!(!fits);
                prop_assert!(matches!(e, Error::Marshal(_)));
            }
        }
    }

    #[test]
    fn test_storage_round_trip(balance in balance_from_bytes(MAX_INTEGER_SIZE + 8)) {
        let counter = ReferenceCounter::new();
        let limits = ExecutionEngineLimits::default();
        let state = AccountState::new(balance);
        let fits = state.balance.to_signed_bytes_le().len() <= MAX_INTEGER_SIZE;
        match StorageItem::from_interoperable(&state, &counter, &limits) {
            Ok(item) => {
                prop_assert!(fits);
                prop_assert_eq!(item.get_interoperable::<AccountState>(&limits).unwrap(), state);
            }
            Err(_) => prop_assert!(!fits),
        }
    }
}

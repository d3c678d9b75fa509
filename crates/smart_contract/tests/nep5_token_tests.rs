//! NEP-5 native token tests.

use neo_config::ADDRESS_SIZE;
use neo_smart_contract::native::{
    AccountState, NativeContract, Nep5Token, TokenSettings, PREFIX_ACCOUNT, PREFIX_TOTAL_SUPPLY,
};
use neo_smart_contract::{ApplicationEngine, Error, MemorySnapshot, StorageKey, TriggerType};
use neo_vm::{ScriptBuilder, StackItem};
use num_bigint::BigInt;

const GAS_ID: i32 = -2;
const ALICE: [u8; ADDRESS_SIZE] = [0xA1; ADDRESS_SIZE];
const BOB: [u8; ADDRESS_SIZE] = [0xB0; ADDRESS_SIZE];

fn gas_token() -> Nep5Token {
    let settings = TokenSettings::new(GAS_ID, "GAS", "gas", 8)
        .with_distribution(ALICE.to_vec(), BigInt::from(1_000))
        .with_block_reward(BOB.to_vec(), BigInt::from(5));
    Nep5Token::new("Neo.Native.Tokens.GAS", settings).unwrap()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("neo_smart_contract=debug")
        .with_test_writer()
        .try_init();
}

fn new_engine(trigger: TriggerType) -> ApplicationEngine {
    ApplicationEngine::new(trigger, Box::new(MemorySnapshot::new()))
}

/// Runs `method` through the stack protocol and returns its result.
fn call(
    token: &Nep5Token,
    engine: &mut ApplicationEngine,
    method: &str,
    args: Vec<StackItem>,
) -> StackItem {
    let mut sb = ScriptBuilder::new();
    sb.emit_syscall(token.service_hash());
    engine.load_script(sb.into_script()).unwrap();
    {
        let stack = engine.evaluation_stack_mut().unwrap();
        stack.push(StackItem::from_array(args)).unwrap();
        stack.push(StackItem::from(method)).unwrap();
    }
    assert!(token.invoke(engine).unwrap(), "{method} was not dispatched");
    let result = engine.evaluation_stack_mut().unwrap().pop().unwrap();
    engine.unload_context();
    result
}

#[test]
fn test_metadata_methods() {
    let token = gas_token();
    let mut engine = new_engine(TriggerType::Application);

    assert_eq!(call(&token, &mut engine, "name", Vec::new()), StackItem::from("GAS"));
    assert_eq!(call(&token, &mut engine, "symbol", Vec::new()), StackItem::from("gas"));
    assert_eq!(
        call(&token, &mut engine, "decimals", Vec::new()),
        StackItem::from_int(8)
    );
}

#[test]
fn test_initialize_mints_distribution() {
    init_tracing();
    let token = gas_token();
    let mut engine = new_engine(TriggerType::Application);
    assert!(token.initialize(&mut engine).unwrap());

    assert_eq!(token.balance_of(&engine, &ALICE).unwrap(), BigInt::from(1_000));
    assert_eq!(token.total_supply(&engine).unwrap(), BigInt::from(1_000));
    assert_eq!(
        call(&token, &mut engine, "balanceOf", vec![StackItem::from_byte_string(ALICE)]),
        StackItem::from_int(1_000)
    );
    assert_eq!(
        call(&token, &mut engine, "totalSupply", Vec::new()),
        StackItem::from_int(1_000)
    );

    // The account record is a serialized one-field struct.
    let key = StorageKey::create_with_bytes(GAS_ID, PREFIX_ACCOUNT, &ALICE);
    let state: AccountState = engine.get_interoperable(&key).unwrap().unwrap();
    assert_eq!(state.balance, BigInt::from(1_000));
    assert!(engine
        .get_storage_item(&StorageKey::create(GAS_ID, PREFIX_TOTAL_SUPPLY))
        .is_some());
}

#[test]
fn test_initialize_twice_is_rejected() {
    let token = gas_token();
    let mut engine = new_engine(TriggerType::Application);
    token.initialize(&mut engine).unwrap();

    assert!(matches!(
        token.initialize(&mut engine),
        Err(Error::InvariantViolation(_))
    ));
    assert_eq!(token.total_supply(&engine).unwrap(), BigInt::from(1_000));
}

#[test]
fn test_initialize_outside_application_writes_nothing() {
    let token = gas_token();
    let mut engine = new_engine(TriggerType::System);
    assert!(token.initialize(&mut engine).is_err());
    assert_eq!(token.total_supply(&engine).unwrap(), BigInt::from(0));
}

#[test]
fn test_unknown_account_has_zero_balance() {
    let token = gas_token();
    let mut engine = new_engine(TriggerType::Application);
    assert_eq!(
        call(&token, &mut engine, "balanceOf", vec![StackItem::from_byte_string(BOB)]),
        StackItem::from_int(0)
    );
}

#[test]
fn test_balance_of_rejects_bad_account() {
    let token = gas_token();
    let mut engine = new_engine(TriggerType::Application);
    let mut sb = ScriptBuilder::new();
    sb.emit_syscall(token.service_hash());
    engine.load_script(sb.into_script()).unwrap();
    {
        let stack = engine.evaluation_stack_mut().unwrap();
        stack
            .push(StackItem::from_array(vec![StackItem::from_byte_string(vec![1, 2, 3])]))
            .unwrap();
        stack.push(StackItem::from("balanceOf")).unwrap();
    }
    assert!(matches!(
        token.invoke(&mut engine),
        Err(Error::NativeContractError(_))
    ));
}

#[test]
fn test_on_persist_mints_block_reward() {
    init_tracing();
    let token = gas_token();
    let mut engine = new_engine(TriggerType::System);

    assert_eq!(
        token.on_persist(&mut engine, &[]).unwrap(),
        StackItem::Boolean(true)
    );
    assert_eq!(
        call(&token, &mut engine, "onPersist", Vec::new()),
        StackItem::Boolean(true)
    );
    assert_eq!(token.balance_of(&engine, &BOB).unwrap(), BigInt::from(10));
    assert_eq!(token.total_supply(&engine).unwrap(), BigInt::from(10));
}

#[test]
fn test_on_persist_outside_system_mints_nothing() {
    let token = gas_token();
    let mut engine = new_engine(TriggerType::Application);
    assert_eq!(
        call(&token, &mut engine, "onPersist", Vec::new()),
        StackItem::Boolean(false)
    );
    assert_eq!(token.balance_of(&engine, &BOB).unwrap(), BigInt::from(0));
}

#[test]
fn test_mint_and_burn() {
    let token = gas_token();
    let mut engine = new_engine(TriggerType::Application);

    token.mint(&mut engine, &BOB, &BigInt::from(50)).unwrap();
    token.burn(&mut engine, &BOB, &BigInt::from(20)).unwrap();
    assert_eq!(token.balance_of(&engine, &BOB).unwrap(), BigInt::from(30));
    assert_eq!(token.total_supply(&engine).unwrap(), BigInt::from(30));

    assert!(matches!(
        token.burn(&mut engine, &BOB, &BigInt::from(31)),
        Err(Error::InvariantViolation(_))
    ));
    assert_eq!(token.balance_of(&engine, &BOB).unwrap(), BigInt::from(30));
}

#[test]
fn test_mint_at_integer_width_limit() {
    init_tracing();
    let token = gas_token();
    let mut engine = new_engine(TriggerType::Application);
    let max: BigInt = (BigInt::from(1) << 255) - 1;

    token.mint(&mut engine, &BOB, &max).unwrap();
    assert_eq!(token.balance_of(&engine, &BOB).unwrap(), max);
    assert_eq!(token.total_supply(&engine).unwrap(), max);

    // Supply overflow is caught before the recipient is credited.
    assert!(matches!(
        token.mint(&mut engine, &ALICE, &BigInt::from(1)),
        Err(Error::InvariantViolation(_))
    ));
    assert!(!engine
        .snapshot()
        .contains(&StorageKey::create_with_bytes(GAS_ID, PREFIX_ACCOUNT, &ALICE)));
    assert_eq!(token.total_supply(&engine).unwrap(), max);

    assert!(matches!(
        token.ledger().credit(&mut engine, &BOB, &BigInt::from(1)),
        Err(Error::InvariantViolation(_))
    ));
    assert_eq!(token.balance_of(&engine, &BOB).unwrap(), max);
}

#[test]
fn test_test_call_total_supply() {
    let token = gas_token();
    let engine = token.test_call("totalSupply", Vec::new()).unwrap();
    assert_eq!(engine.result_stack().len(), 1);
    assert_eq!(engine.result_stack().peek(0).unwrap(), &StackItem::from_int(0));
}

#[test]
fn test_methods_listing() {
    let token = gas_token();
    let names: Vec<_> = token.methods().iter().map(|m| m.name.clone()).collect();
    assert_eq!(
        names,
        vec!["balanceOf", "decimals", "name", "onPersist", "symbol", "totalSupply"]
    );
    assert!(token.methods().iter().filter(|m| m.name != "onPersist").all(|m| m.safe));
}

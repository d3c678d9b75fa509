//! # Neo smart contract native bridge
//!
//! Lets natively implemented contracts take part in the same invocation
//! protocol as bytecode contracts, and moves their persistent state across
//! the VM's typed value stack.
//!
//! - [`ApplicationEngine`]: the execution context a native call runs in
//!   (trigger, invocation stack, snapshot, reference counter).
//! - [`native::NativeContract`]: trigger-gated lifecycle (`initialize`,
//!   `invoke`, `on_persist`) and method dispatch driven by the evaluation stack.
//! - [`Interoperable`]: conversion of native state to and from stack items.
//! - [`native::Nep5Token`]: a token contract whose balances are stored as
//!   [`native::AccountState`] records.
//!
//! ```rust
//! use neo_smart_contract::native::{NativeContract, Nep5Token, TokenSettings};
//! use neo_smart_contract::{ApplicationEngine, MemorySnapshot, TriggerType};
//!
//! let token = Nep5Token::new("Neo.Native.Tokens.GAS", TokenSettings::new(-2, "GAS", "gas", 8)).unwrap();
//! let mut engine = ApplicationEngine::new(TriggerType::Application, Box::new(MemorySnapshot::new()));
//! assert!(token.initialize(&mut engine).unwrap());
//! ```

pub mod application_engine;
pub mod error;
pub mod interoperable;
pub mod native;
pub mod storage;
pub mod trigger_type;

pub use application_engine::ApplicationEngine;
pub use error::{Error, Result};
pub use interoperable::Interoperable;
pub use storage::{MemorySnapshot, Snapshot, StorageItem, StorageKey};
pub use trigger_type::TriggerType;

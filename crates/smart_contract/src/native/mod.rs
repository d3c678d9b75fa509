//! Native contracts.

pub mod account_state;
pub mod native_contract;
pub mod nep5_token;
pub mod registry;

pub use account_state::AccountState;
pub use native_contract::{
    MethodDelegate, MethodHandler, NativeContract, NativeContractBase, NativeMethod,
};
pub use nep5_token::{Nep5Token, TokenLedger, TokenSettings, PREFIX_ACCOUNT, PREFIX_TOTAL_SUPPLY};
pub use registry::NativeRegistry;

//! NEP-5 native token.
//!
//! Storage layout under the contract id:
//!
//! | prefix | key            | value                              |
//! |--------|----------------|------------------------------------|
//! | 11     | -              | total supply, signed little-endian |
//! | 20     | account bytes  | serialized [`AccountState`]        |

use crate::application_engine::ApplicationEngine;
use crate::error::{Error, Result};
use crate::native::account_state::AccountState;
use crate::native::native_contract::{NativeContract, NativeContractBase, NativeMethod};
use crate::storage::{StorageItem, StorageKey};
use neo_config::{NativeTokenConfig, ADDRESS_SIZE, MAX_INTEGER_SIZE};
use neo_vm::StackItem;
use num_bigint::{BigInt, Sign};
use num_traits::Zero;
use std::sync::Arc;
use tracing::{debug, info};

/// Storage prefix of the total supply record.
pub const PREFIX_TOTAL_SUPPLY: u8 = 11;
/// Storage prefix of account records.
pub const PREFIX_ACCOUNT: u8 = 20;

/// Static description of a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSettings {
    pub id: i32,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Minted once when the contract is initialized.
    pub initial_distribution: Vec<(Vec<u8>, BigInt)>,
    /// Minted to `reward_account` on every block persist.
    pub reward_per_block: BigInt,
    pub reward_account: Option<Vec<u8>>,
}

impl TokenSettings {
    pub fn new(id: i32, name: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            id,
            name: name.into(),
            symbol: symbol.into(),
            decimals,
            initial_distribution: Vec::new(),
            reward_per_block: BigInt::zero(),
            reward_account: None,
        }
    }

    pub fn with_distribution(mut self, account: Vec<u8>, amount: BigInt) -> Self {
        self.initial_distribution.push((account, amount));
        self
    }

    pub fn with_block_reward(mut self, account: Vec<u8>, amount: BigInt) -> Self {
        self.reward_account = Some(account);
        self.reward_per_block = amount;
        self
    }

    /// Builds settings from configuration. Accounts are hex encoded.
    pub fn from_config(config: &NativeTokenConfig) -> Result<Self> {
        let mut settings = Self::new(
            config.id,
            config.name.clone(),
            config.symbol.clone(),
            config.decimals,
        );
        for entry in &config.initial_distribution {
            settings = settings.with_distribution(decode_account(&entry.account)?, entry.amount.into());
        }
        if let Some(account) = &config.reward_account {
            settings = settings.with_block_reward(decode_account(account)?, config.reward_per_block.into());
        }
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        let accounts = self
            .initial_distribution
            .iter()
            .map(|(account, _)| account)
            .chain(self.reward_account.iter());
        for account in accounts {
            check_account(account)?;
        }
        let amounts = self
            .initial_distribution
            .iter()
            .map(|(_, amount)| amount)
            .chain(std::iter::once(&self.reward_per_block));
        for amount in amounts {
            if amount.sign() == Sign::Minus {
                return Err(Error::NativeContractError(format!(
                    "Negative token amount {amount}"
                )));
            }
        }
        Ok(())
    }
}

fn decode_account(text: &str) -> Result<Vec<u8>> {
    let account = hex::decode(text.trim_start_matches("0x"))
        .map_err(|e| Error::NativeContractError(format!("Invalid account hex {text}: {e}")))?;
    check_account(&account)?;
    Ok(account)
}

fn check_account(account: &[u8]) -> Result<()> {
    if account.len() != ADDRESS_SIZE {
        return Err(Error::NativeContractError(format!(
            "Invalid account length: expected {ADDRESS_SIZE}, found {}",
            account.len()
        )));
    }
    Ok(())
}

fn check_amount(amount: &BigInt) -> Result<()> {
    if amount.sign() == Sign::Minus {
        return Err(Error::invariant(format!("Negative amount {amount}")));
    }
    Ok(())
}

/// Balances and the supply must stay readable as VM integers.
fn check_width(value: &BigInt, what: &str) -> Result<()> {
    let width = value.to_signed_bytes_le().len();
    if width > MAX_INTEGER_SIZE {
        return Err(Error::invariant(format!(
            "{what} would need {width} bytes, more than {MAX_INTEGER_SIZE}"
        )));
    }
    Ok(())
}

/// Balance and supply bookkeeping of one token, addressed by contract id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLedger {
    id: i32,
}

impl TokenLedger {
    pub fn new(id: i32) -> Self {
        Self { id }
    }

    fn account_key(&self, account: &[u8]) -> StorageKey {
        StorageKey::create_with_bytes(self.id, PREFIX_ACCOUNT, account)
    }

    fn total_supply_key(&self) -> StorageKey {
        StorageKey::create(self.id, PREFIX_TOTAL_SUPPLY)
    }

    /// Balance of `account`. Accounts without a record hold zero.
    pub fn balance_of(&self, engine: &ApplicationEngine, account: &[u8]) -> Result<BigInt> {
        Ok(engine
            .get_interoperable::<AccountState>(&self.account_key(account))?
            .map(|state| state.balance)
            .unwrap_or_default())
    }

    pub fn total_supply(&self, engine: &ApplicationEngine) -> Result<BigInt> {
        Ok(engine
            .get_storage_item(&self.total_supply_key())
            .map(|item| item.as_big_int())
            .unwrap_or_default())
    }

    fn is_initialized(&self, engine: &ApplicationEngine) -> bool {
        engine.get_storage_item(&self.total_supply_key()).is_some()
    }

    fn set_total_supply(&self, engine: &mut ApplicationEngine, value: &BigInt) -> Result<()> {
        engine.put_storage_item(self.total_supply_key(), StorageItem::from_big_int(value))
    }

    /// Adds `amount` to the balance of `account`, creating its record.
    pub fn credit(&self, engine: &mut ApplicationEngine, account: &[u8], amount: &BigInt) -> Result<()> {
        check_amount(amount)?;
        let key = self.account_key(account);
        let mut state = engine
            .get_interoperable::<AccountState>(&key)?
            .unwrap_or_default();
        state.balance += amount;
        check_width(&state.balance, "Balance")?;
        engine.put_interoperable(key, &state)
    }

    /// Removes `amount` from the balance of `account`. A balance never goes
    /// below zero.
    pub fn debit(&self, engine: &mut ApplicationEngine, account: &[u8], amount: &BigInt) -> Result<()> {
        check_amount(amount)?;
        let key = self.account_key(account);
        let mut state = engine
            .get_interoperable::<AccountState>(&key)?
            .unwrap_or_default();
        if state.balance < *amount {
            return Err(Error::invariant(format!(
                "Insufficient balance: {} < {amount}",
                state.balance
            )));
        }
        if amount.is_zero() && !engine.snapshot().contains(&key) {
            return Ok(());
        }
        state.balance -= amount;
        engine.put_interoperable(key, &state)
    }

    /// Credits `account` and grows the total supply.
    pub fn mint(&self, engine: &mut ApplicationEngine, account: &[u8], amount: &BigInt) -> Result<()> {
        check_amount(amount)?;
        let supply = self.total_supply(engine)? + amount;
        check_width(&supply, "Total supply")?;
        self.credit(engine, account, amount)?;
        self.set_total_supply(engine, &supply)?;
        debug!(id = self.id, account = %hex::encode(account), %amount, "minted");
        Ok(())
    }

    /// Debits `account` and shrinks the total supply.
    pub fn burn(&self, engine: &mut ApplicationEngine, account: &[u8], amount: &BigInt) -> Result<()> {
        self.debit(engine, account, amount)?;
        let supply = self.total_supply(engine)? - amount;
        if supply.sign() == Sign::Minus {
            return Err(Error::invariant(format!("Total supply would become {supply}")));
        }
        self.set_total_supply(engine, &supply)?;
        debug!(id = self.id, account = %hex::encode(account), %amount, "burned");
        Ok(())
    }
}

fn account_argument(args: &[StackItem]) -> Result<Vec<u8>> {
    let account = args
        .first()
        .ok_or_else(|| Error::NativeContractError("Missing account argument".to_string()))?
        .as_bytes()
        .map_err(|e| Error::NativeContractError(format!("Invalid account argument: {e}")))?;
    check_account(&account)?;
    Ok(account)
}

/// A native NEP-5 token.
pub struct Nep5Token {
    base: NativeContractBase,
    settings: Arc<TokenSettings>,
    ledger: TokenLedger,
}

impl Nep5Token {
    /// Creates the token and registers its methods.
    pub fn new(service_name: impl Into<String>, settings: TokenSettings) -> Result<Self> {
        settings.validate()?;
        let settings = Arc::new(settings);
        let ledger = TokenLedger::new(settings.id);

        let name = settings.clone();
        let symbol = settings.clone();
        let decimals = settings.clone();
        let base = NativeContractBase::new(service_name, settings.id)
            .with_method(NativeMethod::safe("name", 0, move |_, _| {
                Ok(StackItem::from(name.name.as_str()))
            }))?
            .with_method(NativeMethod::safe("symbol", 0, move |_, _| {
                Ok(StackItem::from(symbol.symbol.as_str()))
            }))?
            .with_method(NativeMethod::safe("decimals", 0, move |_, _| {
                Ok(StackItem::from_int(decimals.decimals))
            }))?
            .with_method(NativeMethod::safe("totalSupply", 1_000_000, move |engine, _| {
                Ok(StackItem::Integer(ledger.total_supply(engine)?))
            }))?
            .with_method(NativeMethod::safe("balanceOf", 1_000_000, move |engine, args| {
                let account = account_argument(args)?;
                Ok(StackItem::Integer(ledger.balance_of(engine, &account)?))
            }))?;

        Ok(Self {
            base,
            settings,
            ledger,
        })
    }

    /// Creates a token from its configuration section.
    pub fn from_config(config: &NativeTokenConfig) -> Result<Self> {
        Self::new(config.service_name.clone(), TokenSettings::from_config(config)?)
    }

    pub fn settings(&self) -> &TokenSettings {
        &self.settings
    }

    pub fn ledger(&self) -> TokenLedger {
        self.ledger
    }

    pub fn balance_of(&self, engine: &ApplicationEngine, account: &[u8]) -> Result<BigInt> {
        self.ledger.balance_of(engine, account)
    }

    pub fn total_supply(&self, engine: &ApplicationEngine) -> Result<BigInt> {
        self.ledger.total_supply(engine)
    }

    pub fn mint(&self, engine: &mut ApplicationEngine, account: &[u8], amount: &BigInt) -> Result<()> {
        self.ledger.mint(engine, account, amount)
    }

    pub fn burn(&self, engine: &mut ApplicationEngine, account: &[u8], amount: &BigInt) -> Result<()> {
        self.ledger.burn(engine, account, amount)
    }
}

impl NativeContract for Nep5Token {
    fn base(&self) -> &NativeContractBase {
        &self.base
    }

    fn initialize_storage(&self, engine: &mut ApplicationEngine) -> Result<()> {
        if self.ledger.is_initialized(engine) {
            return Err(Error::invariant(format!(
                "{} is already initialized",
                self.service_name()
            )));
        }
        self.ledger.set_total_supply(engine, &BigInt::zero())?;
        for (account, amount) in &self.settings.initial_distribution {
            self.ledger.mint(engine, account, amount)?;
        }
        info!(
            contract = self.service_name(),
            accounts = self.settings.initial_distribution.len(),
            "initial distribution minted"
        );
        Ok(())
    }

    fn persist(&self, engine: &mut ApplicationEngine) -> Result<()> {
        if let Some(account) = &self.settings.reward_account {
            if !self.settings.reward_per_block.is_zero() {
                self.ledger
                    .mint(engine, account, &self.settings.reward_per_block)?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Nep5Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Nep5Token")
            .field("service_name", &self.service_name())
            .field("settings", &self.settings)
            .finish()
    }
}

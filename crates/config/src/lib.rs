//! Neo Configuration Module
//!
//! This module provides configuration types for the native-contract runtime
//! bridge: VM resource limits and the settings of the built-in token contracts.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Maximum number of stack references alive in one execution.
pub const MAX_STACK_SIZE: usize = 2048;
/// Maximum size of a single stack item in bytes (1MB).
pub const MAX_ITEM_SIZE: usize = 1024 * 1024;
/// Maximum size of an integer stack item in bytes.
pub const MAX_INTEGER_SIZE: usize = 32;
/// Maximum depth of the invocation stack.
pub const MAX_INVOCATION_STACK_SIZE: usize = 1024;

/// Address size in bytes (UInt160).
pub const ADDRESS_SIZE: usize = 20;

/// Default number of decimals for native tokens.
pub const DEFAULT_TOKEN_DECIMALS: u8 = 8;

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration text is not valid TOML for [`RuntimeConfig`].
    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration parsed but violates a constraint.
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// VM limits configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VmLimitsConfig {
    pub max_stack_size: usize,
    pub max_item_size: usize,
    pub max_integer_size: usize,
    pub max_invocation_stack_size: usize,
}

impl Default for VmLimitsConfig {
    fn default() -> Self {
        Self {
            max_stack_size: MAX_STACK_SIZE,
            max_item_size: MAX_ITEM_SIZE,
            max_integer_size: MAX_INTEGER_SIZE,
            max_invocation_stack_size: MAX_INVOCATION_STACK_SIZE,
        }
    }
}

/// One entry of a token's genesis distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionEntry {
    /// Account bytes, hex encoded.
    pub account: String,
    pub amount: u64,
}

/// Native token configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NativeTokenConfig {
    pub service_name: String,
    pub id: i32,
    /// Display name returned by the token's `name` method.
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Minted once when the contract is initialized.
    pub initial_distribution: Vec<DistributionEntry>,
    /// Minted to `reward_account` on every block persist.
    pub reward_per_block: u64,
    pub reward_account: Option<String>,
}

impl Default for NativeTokenConfig {
    fn default() -> Self {
        Self {
            service_name: "Neo.Native.Tokens.GAS".to_string(),
            id: -2,
            name: "GAS".to_string(),
            symbol: "gas".to_string(),
            decimals: DEFAULT_TOKEN_DECIMALS,
            initial_distribution: Vec::new(),
            reward_per_block: 0,
            reward_account: None,
        }
    }
}

impl NativeTokenConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.service_name.is_empty() {
            return Err(ConfigError::InvalidValue(
                "native token service_name must not be empty".to_string(),
            ));
        }
        if self.reward_per_block > 0 && self.reward_account.is_none() {
            return Err(ConfigError::InvalidValue(format!(
                "{}: reward_per_block requires reward_account",
                self.service_name
            )));
        }
        Ok(())
    }
}

/// Runtime configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub vm: VmLimitsConfig,
    pub native_tokens: Vec<NativeTokenConfig>,
}

impl RuntimeConfig {
    /// Parses a configuration from TOML text. Missing fields take their defaults.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: RuntimeConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks cross-field constraints.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.vm.max_stack_size == 0 {
            return Err(ConfigError::InvalidValue(
                "vm.max_stack_size must be greater than zero".to_string(),
            ));
        }
        if self.vm.max_integer_size == 0 {
            return Err(ConfigError::InvalidValue(
                "vm.max_integer_size must be greater than zero".to_string(),
            ));
        }
        for token in &self.native_tokens {
            token.validate()?;
        }
        Ok(())
    }
}

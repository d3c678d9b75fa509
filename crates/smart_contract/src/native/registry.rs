//! Registry of the native contracts known to a node.

use crate::application_engine::ApplicationEngine;
use crate::error::{Error, Result};
use crate::native::native_contract::NativeContract;
use crate::native::nep5_token::Nep5Token;
use neo_config::RuntimeConfig;
use neo_vm::ServiceHash;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Native contracts indexed by service identifier and id.
#[derive(Default)]
pub struct NativeRegistry {
    contracts: Vec<Arc<dyn NativeContract>>,
    by_hash: HashMap<ServiceHash, usize>,
    by_id: HashMap<i32, usize>,
}

impl NativeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry holding one token per configured section.
    pub fn from_config(config: &RuntimeConfig) -> Result<Self> {
        let mut registry = Self::new();
        for token in &config.native_tokens {
            registry.register(Arc::new(Nep5Token::from_config(token)?))?;
        }
        Ok(registry)
    }

    /// Adds `contract`. Service identifiers and ids must be unique.
    pub fn register(&mut self, contract: Arc<dyn NativeContract>) -> Result<()> {
        let hash = contract.service_hash();
        if let Some(&index) = self.by_hash.get(&hash) {
            return Err(Error::ServiceCollision(format!(
                "{} and {} both map to {hash}",
                self.contracts[index].service_name(),
                contract.service_name()
            )));
        }
        if let Some(&index) = self.by_id.get(&contract.id()) {
            return Err(Error::ServiceCollision(format!(
                "{} and {} share id {}",
                self.contracts[index].service_name(),
                contract.service_name(),
                contract.id()
            )));
        }

        info!(contract = contract.service_name(), id = contract.id(), %hash, "registered native contract");
        let index = self.contracts.len();
        self.by_hash.insert(hash, index);
        self.by_id.insert(contract.id(), index);
        self.contracts.push(contract);
        Ok(())
    }

    pub fn get_by_hash(&self, hash: ServiceHash) -> Option<&Arc<dyn NativeContract>> {
        self.by_hash.get(&hash).map(|&index| &self.contracts[index])
    }

    pub fn get_by_id(&self, id: i32) -> Option<&Arc<dyn NativeContract>> {
        self.by_id.get(&id).map(|&index| &self.contracts[index])
    }

    pub fn get_by_name(&self, service_name: &str) -> Option<&Arc<dyn NativeContract>> {
        self.get_by_hash(ServiceHash::from_name(service_name))
            .filter(|contract| contract.service_name() == service_name)
    }

    pub fn is_native(&self, hash: ServiceHash) -> bool {
        self.by_hash.contains_key(&hash)
    }

    /// Contracts in registration order.
    pub fn contracts(&self) -> impl Iterator<Item = &Arc<dyn NativeContract>> {
        self.contracts.iter()
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    /// Routes the current call to the contract it addresses. Returns
    /// `Ok(false)` when no registered contract matches.
    pub fn invoke(&self, engine: &mut ApplicationEngine) -> Result<bool> {
        match engine
            .current_service_call()
            .and_then(|hash| self.get_by_hash(hash))
        {
            Some(contract) => contract.invoke(engine),
            None => {
                debug!(
                    declared = ?engine.current_service_call(),
                    "no native contract for the current call"
                );
                Ok(false)
            }
        }
    }

    /// Initializes every contract in registration order.
    pub fn initialize_all(&self, engine: &mut ApplicationEngine) -> Result<()> {
        for contract in &self.contracts {
            contract.initialize(engine)?;
        }
        Ok(())
    }

    /// Runs every contract's persist hook. Returns whether all of them ran.
    pub fn on_persist_all(&self, engine: &mut ApplicationEngine) -> Result<bool> {
        let mut all = true;
        for contract in &self.contracts {
            all &= contract.on_persist(engine, &[])?.as_bool()?;
        }
        Ok(all)
    }
}

impl std::fmt::Debug for NativeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.contracts.iter().map(|c| c.service_name()))
            .finish()
    }
}

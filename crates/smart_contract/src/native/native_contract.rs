//! Native contract base.
//!
//! A native contract is addressed by the service identifier derived from its
//! name. A call reaches it when the current script declares a system call to
//! that identifier; the contract then pops the method name and an argument
//! array from the evaluation stack, dispatches by name and pushes the
//! method's result.

use crate::application_engine::ApplicationEngine;
use crate::error::{Error, Result};
use crate::storage::MemorySnapshot;
use crate::trigger_type::TriggerType;
use neo_vm::{Script, ScriptBuilder, ServiceHash, StackItem};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Signature of a native method body.
pub type MethodDelegate =
    Arc<dyn Fn(&mut ApplicationEngine, &[StackItem]) -> Result<StackItem> + Send + Sync>;

/// What runs when a method is dispatched.
#[derive(Clone)]
pub enum MethodHandler {
    /// The contract's own block persist hook, see [`NativeContract::on_persist`].
    OnPersist,
    /// A method body supplied at registration.
    Delegate(MethodDelegate),
}

impl fmt::Debug for MethodHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodHandler::OnPersist => write!(f, "OnPersist"),
            MethodHandler::Delegate(_) => write!(f, "Delegate"),
        }
    }
}

/// A method exposed by a native contract.
#[derive(Debug, Clone)]
pub struct NativeMethod {
    pub name: String,
    /// Execution price charged by the host.
    pub price: i64,
    /// Safe methods do not write state.
    pub safe: bool,
    pub handler: MethodHandler,
}

impl NativeMethod {
    /// A read-only method.
    pub fn safe<F>(name: impl Into<String>, price: i64, handler: F) -> Self
    where
        F: Fn(&mut ApplicationEngine, &[StackItem]) -> Result<StackItem> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            price,
            safe: true,
            handler: MethodHandler::Delegate(Arc::new(handler)),
        }
    }

    /// A method that may write state.
    pub fn unsafe_method<F>(name: impl Into<String>, price: i64, handler: F) -> Self
    where
        F: Fn(&mut ApplicationEngine, &[StackItem]) -> Result<StackItem> + Send + Sync + 'static,
    {
        Self {
            safe: false,
            ..Self::safe(name, price, handler)
        }
    }

    fn on_persist() -> Self {
        Self {
            name: NativeContractBase::ON_PERSIST.to_string(),
            price: 0,
            safe: false,
            handler: MethodHandler::OnPersist,
        }
    }
}

/// Identity and method table shared by every native contract.
#[derive(Debug, Clone)]
pub struct NativeContractBase {
    service_name: String,
    id: i32,
    service_hash: ServiceHash,
    script: Script,
    methods: HashMap<String, NativeMethod>,
}

impl NativeContractBase {
    /// Name of the block persist method every native contract exposes.
    pub const ON_PERSIST: &'static str = "onPersist";

    /// Creates the base for `service_name`. The reserved `onPersist` method
    /// is registered here.
    pub fn new(service_name: impl Into<String>, id: i32) -> Self {
        let service_name = service_name.into();
        let service_hash = ServiceHash::from_name(&service_name);
        let mut sb = ScriptBuilder::new();
        sb.emit_syscall(service_hash);

        let mut methods = HashMap::new();
        methods.insert(Self::ON_PERSIST.to_string(), NativeMethod::on_persist());

        Self {
            service_name,
            id,
            service_hash,
            script: sb.into_script(),
            methods,
        }
    }

    /// Adds `method` to the table. Names are unique.
    pub fn register(&mut self, method: NativeMethod) -> Result<()> {
        if self.methods.contains_key(&method.name) {
            return Err(Error::DuplicateMethod(format!(
                "{} already exposes {}",
                self.service_name, method.name
            )));
        }
        self.methods.insert(method.name.clone(), method);
        Ok(())
    }

    pub fn with_method(mut self, method: NativeMethod) -> Result<Self> {
        self.register(method)?;
        Ok(self)
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn service_hash(&self) -> ServiceHash {
        self.service_hash
    }

    /// Script that calls the contract's service.
    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn get_method(&self, name: &str) -> Option<&NativeMethod> {
        self.methods.get(name)
    }

    /// Registered methods sorted by name.
    pub fn methods(&self) -> Vec<&NativeMethod> {
        let mut methods: Vec<_> = self.methods.values().collect();
        methods.sort_by(|a, b| a.name.cmp(&b.name));
        methods
    }
}

/// A contract implemented in native code.
///
/// Implementors supply [`base`](NativeContract::base) and optionally the
/// storage hooks; the lifecycle and dispatch protocol is provided.
pub trait NativeContract: Send + Sync {
    fn base(&self) -> &NativeContractBase;

    /// Seeds the contract's storage. Runs once, from `initialize`.
    fn initialize_storage(&self, _engine: &mut ApplicationEngine) -> Result<()> {
        Ok(())
    }

    /// Applies the contract's per-block effects. Runs from `on_persist`
    /// under the System trigger only.
    fn persist(&self, _engine: &mut ApplicationEngine) -> Result<()> {
        Ok(())
    }

    fn service_name(&self) -> &str {
        self.base().service_name()
    }

    fn id(&self) -> i32 {
        self.base().id()
    }

    fn service_hash(&self) -> ServiceHash {
        self.base().service_hash()
    }

    fn script(&self) -> &Script {
        self.base().script()
    }

    fn methods(&self) -> Vec<&NativeMethod> {
        self.base().methods()
    }

    /// Runs the contract's one-time setup. Only permitted under the
    /// Application trigger.
    fn initialize(&self, engine: &mut ApplicationEngine) -> Result<bool> {
        let trigger = engine.trigger();
        if trigger != TriggerType::Application {
            warn!(contract = self.service_name(), %trigger, "initialize rejected");
            return Err(Error::invalid_phase(
                "initialize",
                TriggerType::Application,
                trigger,
            ));
        }
        self.initialize_storage(engine)?;
        info!(contract = self.service_name(), id = self.id(), "native contract initialized");
        Ok(true)
    }

    /// Handles a call if the current script addresses this contract.
    ///
    /// Pops the method name, then the argument array. Returns `Ok(false)`
    /// when the call is not for this contract or names no registered
    /// method; otherwise pushes the method's result and returns `Ok(true)`.
    fn invoke(&self, engine: &mut ApplicationEngine) -> Result<bool> {
        match engine.current_service_call() {
            Some(hash) if hash == self.service_hash() => {}
            other => {
                debug!(
                    contract = self.service_name(),
                    declared = ?other,
                    "call is not addressed to this contract"
                );
                return Ok(false);
            }
        }

        let (operation, args) = {
            let stack = engine.evaluation_stack_mut()?;
            let operation = stack.pop()?;
            let args = stack.pop()?;
            (operation, args)
        };
        let args = args.as_array()?;

        let method = match operation
            .as_string()
            .ok()
            .and_then(|name| self.base().get_method(&name))
        {
            Some(method) => method,
            None => {
                debug!(contract = self.service_name(), ?operation, "unknown method");
                return Ok(false);
            }
        };

        debug!(contract = self.service_name(), method = %method.name, "dispatching native method");
        let result = match &method.handler {
            MethodHandler::OnPersist => self.on_persist(engine, args)?,
            MethodHandler::Delegate(handler) => handler(engine, args)?,
        };
        engine.evaluation_stack_mut()?.push(result)?;
        Ok(true)
    }

    /// Block persist hook. Yields `false` without side effects unless the
    /// engine runs under the System trigger.
    fn on_persist(&self, engine: &mut ApplicationEngine, _args: &[StackItem]) -> Result<StackItem> {
        let trigger = engine.trigger();
        if trigger != TriggerType::System {
            debug!(contract = self.service_name(), %trigger, "onPersist outside System trigger");
            return Ok(StackItem::false_value());
        }
        self.persist(engine)?;
        Ok(StackItem::true_value())
    }

    /// Runs `operation` against a scratch Application engine with an empty
    /// snapshot and returns the engine. A dispatched method's result is on
    /// the result stack; an unknown operation leaves it empty.
    fn test_call(&self, operation: &str, args: Vec<StackItem>) -> Result<ApplicationEngine> {
        let mut engine =
            ApplicationEngine::new(TriggerType::Application, Box::new(MemorySnapshot::new()));
        engine.load_script(self.script().clone())?;
        {
            let stack = engine.evaluation_stack_mut()?;
            stack.push(StackItem::from_array(args))?;
            stack.push(StackItem::from(operation))?;
        }
        if self.invoke(&mut engine)? {
            let result = engine.evaluation_stack_mut()?.pop()?;
            engine.result_stack_mut().push(result)?;
        }
        Ok(engine)
    }
}

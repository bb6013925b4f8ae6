//! Handler registry
//!
//! Maps handler keys from control names to factories. The set of keys is
//! closed ([`HandlerKey`]), so an unknown key in a control name is a lookup
//! miss rather than a registration problem.

use std::collections::HashMap;

use crate::error::BindingError;
use crate::handlers::{
    HandlerFactory, HandlerKey, HomeHandler, JogHandler, MachineHandler, ProgramHandler,
};

#[derive(Default)]
pub struct HandlerRegistry {
    factories: HashMap<HandlerKey, HandlerFactory>,
}

impl HandlerRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in handler family
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        let builtins: [(HandlerKey, HandlerFactory); 4] = [
            (HandlerKey::Home, HomeHandler::create as HandlerFactory),
            (HandlerKey::Machine, MachineHandler::create as HandlerFactory),
            (HandlerKey::Program, ProgramHandler::create as HandlerFactory),
            (HandlerKey::Jog, JogHandler::create as HandlerFactory),
        ];
        for (key, factory) in builtins {
            registry.factories.insert(key, factory);
        }
        registry
    }

    /// Add a factory; each key may be registered once
    pub fn register(&mut self, key: HandlerKey, factory: HandlerFactory) -> Result<(), BindingError> {
        if self.factories.contains_key(&key) {
            return Err(BindingError::DuplicateHandler { key });
        }
        self.factories.insert(key, factory);
        Ok(())
    }

    /// Look up the factory for a key taken from `control`'s name
    pub fn resolve(
        &self,
        key: &str,
        control: &str,
    ) -> Result<(HandlerKey, HandlerFactory), BindingError> {
        let unknown = || BindingError::UnknownHandler {
            control: control.to_string(),
            key: key.to_string(),
        };
        let parsed: HandlerKey = key.parse().map_err(|_| unknown())?;
        self.factories
            .get(&parsed)
            .map(|factory| (parsed, *factory))
            .ok_or_else(unknown)
    }

    /// Registered keys in declaration order
    pub fn keys(&self) -> Vec<HandlerKey> {
        let mut keys: Vec<HandlerKey> = self.factories.keys().copied().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}

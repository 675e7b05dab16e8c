use crate::{
    constants::DEFAULT_NAMING_STRATEGY,
    naming::{DubboNaming, NamingError, NamingStrategy, ThriftNaming},
};
use once_cell::sync::Lazy;
use std::{collections::HashMap, sync::Arc};

static BUILTIN_STRATEGIES: Lazy<Vec<(&'static str, Arc<dyn NamingStrategy>)>> = Lazy::new(|| {
    vec![
        (
            DEFAULT_NAMING_STRATEGY,
            Arc::new(ThriftNaming) as Arc<dyn NamingStrategy>,
        ),
        ("dubbo", Arc::new(DubboNaming) as Arc<dyn NamingStrategy>),
    ]
});

/// Naming strategies selectable by configuration key.
#[derive(Clone)]
pub struct NamingRegistry {
    strategies: HashMap<String, Arc<dyn NamingStrategy>>,
}

impl Default for NamingRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl NamingRegistry {
    /// A registry with no strategies at all.
    pub fn empty() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// A registry holding the `thrift` (default) and `dubbo` strategies.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for (key, strategy) in BUILTIN_STRATEGIES.iter() {
            registry.register(*key, Arc::clone(strategy));
        }
        registry
    }

    pub fn register(
        &mut self,
        key: impl Into<String>,
        strategy: Arc<dyn NamingStrategy>,
    ) -> &mut Self {
        self.strategies.insert(key.into(), strategy);
        self
    }

    pub fn get(&self, key: &str) -> Result<Arc<dyn NamingStrategy>, NamingError> {
        self.strategies
            .get(key)
            .cloned()
            .ok_or_else(|| NamingError::UnknownStrategy(key.to_owned()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.strategies.contains_key(key)
    }
}

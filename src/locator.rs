use crate::structure::StructTypeHandle;
use std::{collections::HashMap, sync::Arc};

/// Finds generated struct types by name at runtime.
pub trait TypeLocator: Send + Sync {
    fn locate(&self, name: &str) -> Option<StructTypeHandle>;
}

/// In-memory [`TypeLocator`] populated up front by generated code.
#[derive(Default, Clone)]
pub struct StructTypeRegistry {
    types: HashMap<String, StructTypeHandle>,
}

impl StructTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type under its own name, replacing any previous entry.
    pub fn register(&mut self, handle: StructTypeHandle) -> &mut Self {
        self.types.insert(handle.name().to_owned(), handle);
        self
    }

    pub fn with(mut self, handle: StructTypeHandle) -> Self {
        self.register(handle);
        self
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn into_locator(self) -> Arc<dyn TypeLocator> {
        Arc::new(self)
    }
}

impl TypeLocator for StructTypeRegistry {
    fn locate(&self, name: &str) -> Option<StructTypeHandle> {
        self.types.get(name).cloned()
    }
}

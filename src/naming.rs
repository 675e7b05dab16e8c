mod naming_error;
mod naming_registry;
mod naming_strategy;

pub use naming_error::{NamingError, TypeRole};
pub use naming_registry::NamingRegistry;
pub use naming_strategy::{DubboNaming, NamingStrategy, ThriftNaming};

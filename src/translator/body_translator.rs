use crate::{
    naming::NamingStrategy,
    structure::ThriftStruct,
    translator::SerializationError,
    type_cache::TypeCache,
};

/// Converts between positional structs and named calls/results.
///
/// Borrowed per message from the codec: the naming strategy chosen by the
/// connection's configuration and the codec's type cache.
pub struct BodyTranslator<'a> {
    pub(super) naming: &'a dyn NamingStrategy,
    pub(super) types: &'a TypeCache,
}

impl<'a> BodyTranslator<'a> {
    pub fn new(naming: &'a dyn NamingStrategy, types: &'a TypeCache) -> Self {
        Self { naming, types }
    }

    pub(super) fn instantiate(
        &self,
        type_name: &str,
    ) -> Result<Box<dyn ThriftStruct>, SerializationError> {
        Ok(self.types.resolve(type_name)?.new_instance())
    }
}

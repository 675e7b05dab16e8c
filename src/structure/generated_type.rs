use crate::structure::{StructType, StructTypeHandle, ThriftStruct};
use std::{marker::PhantomData, sync::Arc};

/// [`StructType`] for a compiled struct type with a `Default` constructor.
pub struct GeneratedType<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> GeneratedType<T>
where
    T: ThriftStruct + Default + 'static,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub fn handle(name: &'static str) -> StructTypeHandle {
        Arc::new(Self::new(name))
    }
}

impl<T> StructType for GeneratedType<T>
where
    T: ThriftStruct + Default + 'static,
{
    fn name(&self) -> &str {
        self.name
    }

    fn new_instance(&self) -> Box<dyn ThriftStruct> {
        Box::new(T::default())
    }
}

use crate::value::{Value, ValueType};

/// A named method call with positional arguments.
///
/// `arguments` and `parameter_types` are parallel lists; `None` marks an
/// absent argument, which is left unset on the wire.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Invocation {
    pub service: String,
    pub method: String,
    pub arguments: Vec<Option<Value>>,
    pub parameter_types: Vec<ValueType>,
}

impl Invocation {
    pub fn new(service: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            method: method.into(),
            arguments: Vec::new(),
            parameter_types: Vec::new(),
        }
    }

    /// Appends a present argument, taking its type from the value.
    pub fn with_argument(mut self, value: Value) -> Self {
        self.parameter_types.push(value.value_type());
        self.arguments.push(Some(value));
        self
    }

    /// Appends an absent argument of the given type.
    pub fn with_absent(mut self, value_type: ValueType) -> Self {
        self.parameter_types.push(value_type);
        self.arguments.push(None);
        self
    }
}

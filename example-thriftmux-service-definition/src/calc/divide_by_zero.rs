use crate::calc::DIVIDE_BY_ZERO;
use thriftmux::value::{StructValue, Value};

const MESSAGE_FIELD_ID: i16 = 1;

/// `exception DivideByZero { 1: string message }`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DivideByZero {
    pub message: String,
}

impl DivideByZero {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Reads the exception back from a generic struct value. `None` when
    /// `value` is some other type.
    pub fn from_value(value: &StructValue) -> Option<Self> {
        if value.type_name != DIVIDE_BY_ZERO {
            return None;
        }

        let message = match value.field(MESSAGE_FIELD_ID) {
            Some(Value::String(message)) => message.clone(),
            _ => String::new(),
        };
        Some(Self { message })
    }
}

impl From<DivideByZero> for StructValue {
    fn from(exception: DivideByZero) -> Self {
        StructValue::new(DIVIDE_BY_ZERO)
            .with_field(MESSAGE_FIELD_ID, Value::String(exception.message))
    }
}

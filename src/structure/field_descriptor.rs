use crate::value::ValueType;

/// Declaration of one positional field of a generated struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub id: i16,
    pub name: String,
    pub value_type: ValueType,
}

impl FieldDescriptor {
    pub fn new(id: i16, name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            id,
            name: name.into(),
            value_type,
        }
    }
}

/// Rejections raised by a struct's field setter.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("no field with id {0}")]
    UnknownField(i16),

    #[error("field {id} expects {expected}, got {found}")]
    TypeMismatch {
        id: i16,
        expected: ValueType,
        found: ValueType,
    },
}

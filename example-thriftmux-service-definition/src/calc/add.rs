use crate::calc::{ADD_ARGS, ADD_RESULT};
use once_cell::sync::Lazy;
use thriftmux::{
    structure::{FieldDescriptor, FieldError, ThriftStruct},
    value::{Value, ValueType},
};

static ADD_ARGS_FIELDS: Lazy<Vec<FieldDescriptor>> = Lazy::new(|| {
    vec![
        FieldDescriptor::new(1, "a", ValueType::I32),
        FieldDescriptor::new(2, "b", ValueType::I32),
    ]
});

static ADD_RESULT_FIELDS: Lazy<Vec<FieldDescriptor>> =
    Lazy::new(|| vec![FieldDescriptor::new(0, "success", ValueType::I32)]);

/// `i32 add(1: i32 a, 2: i32 b)`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddArgs {
    pub a: Option<i32>,
    pub b: Option<i32>,
}

impl ThriftStruct for AddArgs {
    fn type_name(&self) -> &str {
        ADD_ARGS
    }

    fn fields(&self) -> &[FieldDescriptor] {
        &ADD_ARGS_FIELDS
    }

    fn get(&self, id: i16) -> Option<Value> {
        match id {
            1 => self.a.map(Value::I32),
            2 => self.b.map(Value::I32),
            _ => None,
        }
    }

    fn set(&mut self, id: i16, value: Value) -> Result<(), FieldError> {
        match (id, value) {
            (1, Value::I32(a)) => self.a = Some(a),
            (2, Value::I32(b)) => self.b = Some(b),
            (1 | 2, other) => {
                return Err(FieldError::TypeMismatch {
                    id,
                    expected: ValueType::I32,
                    found: other.value_type(),
                });
            }
            _ => return Err(FieldError::UnknownField(id)),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddResult {
    pub success: Option<i32>,
}

impl ThriftStruct for AddResult {
    fn type_name(&self) -> &str {
        ADD_RESULT
    }

    fn fields(&self) -> &[FieldDescriptor] {
        &ADD_RESULT_FIELDS
    }

    fn get(&self, id: i16) -> Option<Value> {
        match id {
            0 => self.success.map(Value::I32),
            _ => None,
        }
    }

    fn set(&mut self, id: i16, value: Value) -> Result<(), FieldError> {
        match (id, value) {
            (0, Value::I32(success)) => self.success = Some(success),
            (0, other) => {
                return Err(FieldError::TypeMismatch {
                    id,
                    expected: ValueType::I32,
                    found: other.value_type(),
                });
            }
            _ => return Err(FieldError::UnknownField(id)),
        }
        Ok(())
    }
}

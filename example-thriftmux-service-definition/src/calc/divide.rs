use crate::calc::{DIVIDE_ARGS, DIVIDE_BY_ZERO, DIVIDE_RESULT, DivideByZero};
use once_cell::sync::Lazy;
use thriftmux::{
    structure::{FieldDescriptor, FieldError, ThriftStruct},
    value::{Value, ValueType},
};

static DIVIDE_ARGS_FIELDS: Lazy<Vec<FieldDescriptor>> = Lazy::new(|| {
    vec![
        FieldDescriptor::new(1, "dividend", ValueType::I64),
        FieldDescriptor::new(2, "divisor", ValueType::I64),
    ]
});

static DIVIDE_RESULT_FIELDS: Lazy<Vec<FieldDescriptor>> = Lazy::new(|| {
    vec![
        FieldDescriptor::new(0, "success", ValueType::I64),
        FieldDescriptor::new(1, "ouch", ValueType::Exception(DIVIDE_BY_ZERO.into())),
    ]
});

/// `i64 divide(1: i64 dividend, 2: i64 divisor) throws (1: DivideByZero ouch)`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DivideArgs {
    pub dividend: Option<i64>,
    pub divisor: Option<i64>,
}

impl ThriftStruct for DivideArgs {
    fn type_name(&self) -> &str {
        DIVIDE_ARGS
    }

    fn fields(&self) -> &[FieldDescriptor] {
        &DIVIDE_ARGS_FIELDS
    }

    fn get(&self, id: i16) -> Option<Value> {
        match id {
            1 => self.dividend.map(Value::I64),
            2 => self.divisor.map(Value::I64),
            _ => None,
        }
    }

    fn set(&mut self, id: i16, value: Value) -> Result<(), FieldError> {
        match (id, value) {
            (1, Value::I64(dividend)) => self.dividend = Some(dividend),
            (2, Value::I64(divisor)) => self.divisor = Some(divisor),
            (1 | 2, other) => {
                return Err(FieldError::TypeMismatch {
                    id,
                    expected: ValueType::I64,
                    found: other.value_type(),
                });
            }
            _ => return Err(FieldError::UnknownField(id)),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DivideResult {
    pub success: Option<i64>,
    pub ouch: Option<DivideByZero>,
}

impl ThriftStruct for DivideResult {
    fn type_name(&self) -> &str {
        DIVIDE_RESULT
    }

    fn fields(&self) -> &[FieldDescriptor] {
        &DIVIDE_RESULT_FIELDS
    }

    fn get(&self, id: i16) -> Option<Value> {
        match id {
            0 => self.success.map(Value::I64),
            1 => self
                .ouch
                .clone()
                .map(|ouch| Value::Exception(ouch.into())),
            _ => None,
        }
    }

    fn set(&mut self, id: i16, value: Value) -> Result<(), FieldError> {
        match (id, value) {
            (0, Value::I64(success)) => self.success = Some(success),
            (1, Value::Exception(exception)) if exception.type_name == DIVIDE_BY_ZERO => {
                self.ouch = DivideByZero::from_value(&exception);
            }
            (0 | 1, other) => {
                let expected = match id {
                    0 => ValueType::I64,
                    _ => ValueType::Exception(DIVIDE_BY_ZERO.into()),
                };
                return Err(FieldError::TypeMismatch {
                    id,
                    expected,
                    found: other.value_type(),
                });
            }
            _ => return Err(FieldError::UnknownField(id)),
        }
        Ok(())
    }
}

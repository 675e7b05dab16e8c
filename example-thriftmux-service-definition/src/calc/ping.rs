use crate::calc::{PING_ARGS, PING_RESULT};
use thriftmux::{
    structure::{FieldDescriptor, FieldError, ThriftStruct},
    value::Value,
};

/// `void ping()`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PingArgs;

impl ThriftStruct for PingArgs {
    fn type_name(&self) -> &str {
        PING_ARGS
    }

    fn fields(&self) -> &[FieldDescriptor] {
        &[]
    }

    fn get(&self, _id: i16) -> Option<Value> {
        None
    }

    fn set(&mut self, id: i16, _value: Value) -> Result<(), FieldError> {
        Err(FieldError::UnknownField(id))
    }
}

/// Result of a void method: no success field and no exceptions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PingResult;

impl ThriftStruct for PingResult {
    fn type_name(&self) -> &str {
        PING_RESULT
    }

    fn fields(&self) -> &[FieldDescriptor] {
        &[]
    }

    fn get(&self, _id: i16) -> Option<Value> {
        None
    }

    fn set(&mut self, id: i16, _value: Value) -> Result<(), FieldError> {
        Err(FieldError::UnknownField(id))
    }
}

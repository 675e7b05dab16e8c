use crate::{
    protocol::{ApplicationException, ApplicationExceptionKind},
    value::{StructValue, Value},
};

/// Failure side of a call outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum RpcException {
    /// An exception type declared by the method in the IDL.
    Declared(StructValue),

    /// A generic application-level failure with no declared type.
    Application(ApplicationException),
}

impl RpcException {
    /// Shorthand for a generic failure of unknown kind.
    pub fn application(message: impl Into<String>) -> Self {
        RpcException::Application(ApplicationException::new(
            ApplicationExceptionKind::Unknown,
            message,
        ))
    }

    pub fn message(&self) -> String {
        match self {
            RpcException::Declared(value) => value
                .message()
                .map(str::to_owned)
                .unwrap_or_else(|| value.type_name.clone()),
            RpcException::Application(exception) => exception.message.clone(),
        }
    }
}

/// Outcome of a call: a value (`None` for void) or a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum RpcResult {
    Value(Option<Value>),
    Exception(RpcException),
}

impl RpcResult {
    pub fn void() -> Self {
        RpcResult::Value(None)
    }

    pub fn value(value: Value) -> Self {
        RpcResult::Value(Some(value))
    }

    pub fn is_exception(&self) -> bool {
        matches!(self, RpcResult::Exception(_))
    }
}

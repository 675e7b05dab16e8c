use crate::{
    naming::NamingError, protocol::ProtocolError, structure::FieldError,
    type_cache::ClassResolutionError, value::ValueType,
};

/// Per-call failure while translating between a struct and an RPC call.
///
/// On decode it keeps the call from reaching the runtime; on encode it
/// keeps the message from being sent. Other in-flight calls are unaffected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SerializationError {
    #[error(transparent)]
    Naming(#[from] NamingError),

    #[error(transparent)]
    ClassResolution(#[from] ClassResolutionError),

    #[error("struct read/write failed: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("`{type_name}` declares no field with id {id}")]
    MissingField { type_name: String, id: i16 },

    #[error("`{type_name}`: {source}")]
    Field {
        type_name: String,
        #[source]
        source: FieldError,
    },

    #[error(
        "argument {index} is declared as {declared} but field {id} of `{type_name}` is {expected}"
    )]
    ParameterTypeMismatch {
        type_name: String,
        index: usize,
        id: i16,
        declared: ValueType,
        expected: ValueType,
    },

    #[error("{0} arguments do not fit positional field ids")]
    TooManyArguments(usize),

    #[error("request carries no service name")]
    MissingService,

    #[error("no pending call recorded for correlation id {0}")]
    UnknownCorrelation(i64),

    /// A call arrived under a correlation id that is still awaiting its reply.
    #[error("correlation id {0} is already awaiting a reply")]
    DuplicateCorrelation(i64),

    #[error("correlation id {0} does not fit a native sequence id")]
    CorrelationOutOfRange(i64),
}

impl SerializationError {
    /// Whether the failure was only the input running out.
    pub fn is_eof(&self) -> bool {
        matches!(self, SerializationError::Protocol(err) if err.is_eof())
    }
}

/// Failures raised by the binary protocol primitives.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProtocolError {
    /// The input ended before the value being read was complete.
    #[error("unexpected end of input: {needed} more byte(s) required")]
    UnexpectedEof { needed: usize },

    /// A strict message header carried an unknown version.
    #[error("bad message version {0:#010x}")]
    BadVersion(u32),

    /// A length or element count was negative.
    #[error("negative size {0}")]
    NegativeSize(i32),

    /// A length does not fit into the wire representation.
    #[error("size {0} exceeds the wire limit")]
    SizeLimit(usize),

    #[error("invalid utf-8 in string")]
    InvalidUtf8,

    #[error("unknown type tag {0}")]
    UnknownType(u8),

    #[error("unknown message kind {0}")]
    UnknownMessageKind(u8),

    /// Structs or containers nested deeper than the reader allows.
    #[error("nesting depth limit exceeded")]
    DepthLimit,

    /// A container's element tag disagreed with the declared element type.
    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl ProtocolError {
    /// Whether this error only means the input was cut short.
    pub fn is_eof(&self) -> bool {
        matches!(self, ProtocolError::UnexpectedEof { .. })
    }
}

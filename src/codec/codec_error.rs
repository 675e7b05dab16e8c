use crate::{
    codec::ConfigError, fallback::FallbackError, frame::FrameDecodeError, naming::NamingError,
    protocol::ProtocolError, translator::SerializationError,
};

/// Everything [`ThriftCodec`](crate::codec::ThriftCodec) can fail with.
///
/// None of these are retried by the codec. `Protocol` errors leave the
/// input stream in an unknown state; the others concern a single message.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    /// Bad frame header or message envelope.
    #[error("protocol error: {0}")]
    Protocol(#[from] FrameDecodeError),

    /// The configured naming strategy is not registered.
    #[error(transparent)]
    Naming(#[from] NamingError),

    /// A message body could not be translated.
    #[error("serialization failed: {0}")]
    Serialization(#[from] SerializationError),

    #[error("invalid channel configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("fallback codec failed: {0}")]
    Fallback(#[from] FallbackError),
}

impl From<ProtocolError> for CodecError {
    fn from(error: ProtocolError) -> Self {
        CodecError::Protocol(FrameDecodeError::Protocol(error))
    }
}

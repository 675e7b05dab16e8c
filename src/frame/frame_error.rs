use crate::protocol::ProtocolError;

/// Failures while reading a frame header or message envelope.
///
/// Any of these makes the current decode attempt fatal; transports
/// typically close the connection.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrameDecodeError {
    #[error("unknown magic code {0:#06x}")]
    BadMagic(u16),

    #[error("unsupported frame version {0}")]
    UnsupportedVersion(u8),

    #[error("negative frame length {0}")]
    NegativeLength(i32),

    /// The header length field disagrees with the bytes actually present.
    #[error("malformed header: declared {declared} bytes, found {actual}")]
    MalformedHeader { declared: usize, actual: usize },

    #[error("header length {header_length} exceeds total length {total_length}")]
    HeaderOverrun {
        header_length: usize,
        total_length: usize,
    },

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

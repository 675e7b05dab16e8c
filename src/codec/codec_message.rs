use crate::rpc::{Request, Response};

/// A message exchanged with the RPC runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum CodecMessage {
    Request(Request),
    Response(Response),

    /// Plain text handled by the fallback codec.
    Text(String),
}

/// Outcome of a decode attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// The buffer holds no complete message yet. Nothing was consumed.
    NeedMoreInput,

    /// One message was decoded from the first `consumed` bytes.
    Message {
        message: CodecMessage,
        consumed: usize,
    },
}

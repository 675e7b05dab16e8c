use crate::protocol::MessageKind;

/// The binary protocol's own message header.
///
/// `seq_id` is the format-native sequence id. It exists to satisfy the
/// envelope layout and is independent from the RPC correlation id carried
/// in the frame header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEnvelope {
    /// Method name.
    pub name: String,
    pub kind: MessageKind,
    pub seq_id: i32,
}

impl MessageEnvelope {
    pub fn new(name: impl Into<String>, kind: MessageKind, seq_id: i32) -> Self {
        Self {
            name: name.into(),
            kind,
            seq_id,
        }
    }
}

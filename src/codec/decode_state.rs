use crate::codec::Decoded;

/// Progress of a single decode call. Nothing survives between calls; a
/// partial message is simply decoded again once more bytes arrive.
#[derive(Debug)]
pub(super) enum DecodeState {
    AwaitingHeader,

    /// The frame (or, in native mode, the buffer) is in hand.
    AwaitingBody {
        service: String,
        /// Taken from the frame header; native messages use the
        /// envelope's sequence id instead.
        correlation_id: Option<i64>,
        body_start: usize,
        frame_end: usize,
    },

    Complete(Decoded),
}

use crate::{
    codec::{CodecMessage, Decoded},
    constants::DEFAULT_FALLBACK_MAX_LINE,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FallbackError {
    #[error("line exceeds {0} bytes")]
    LineTooLong(usize),

    #[error("line is not valid utf-8")]
    InvalidUtf8,
}

/// Codec used for traffic that is too short to be a frame, and for
/// outbound [`CodecMessage::Text`] messages.
pub trait FallbackCodec: Send + Sync {
    fn decode(&self, buf: &[u8]) -> Result<Decoded, FallbackError>;

    fn encode(&self, text: &str) -> Result<Vec<u8>, FallbackError>;
}

/// Newline-delimited text, as spoken by an operator console.
///
/// Lines end in `\n` with an optional preceding `\r`; outbound text is
/// terminated with `\r\n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCodec {
    max_line: usize,
}

impl LineCodec {
    pub fn new(max_line: usize) -> Self {
        Self { max_line }
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_MAX_LINE)
    }
}

impl FallbackCodec for LineCodec {
    fn decode(&self, buf: &[u8]) -> Result<Decoded, FallbackError> {
        let Some(end) = buf.iter().position(|byte| *byte == b'\n') else {
            if buf.len() > self.max_line {
                return Err(FallbackError::LineTooLong(self.max_line));
            }
            return Ok(Decoded::NeedMoreInput);
        };

        let line = buf[..end].strip_suffix(b"\r").unwrap_or(&buf[..end]);
        if line.len() > self.max_line {
            return Err(FallbackError::LineTooLong(self.max_line));
        }

        let text = std::str::from_utf8(line).map_err(|_| FallbackError::InvalidUtf8)?;

        Ok(Decoded::Message {
            message: CodecMessage::Text(text.to_owned()),
            consumed: end + 1,
        })
    }

    fn encode(&self, text: &str) -> Result<Vec<u8>, FallbackError> {
        if text.len() > self.max_line {
            return Err(FallbackError::LineTooLong(self.max_line));
        }

        let mut bytes = Vec::with_capacity(text.len() + 2);
        bytes.extend_from_slice(text.as_bytes());
        bytes.extend_from_slice(b"\r\n");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_line_needs_more_input() {
        let codec = LineCodec::default();
        assert_eq!(codec.decode(b"stat").expect("decode"), Decoded::NeedMoreInput);
    }

    #[test]
    fn line_is_split_on_newline() {
        let codec = LineCodec::default();

        let decoded = codec.decode(b"ls\r\nps\n").expect("decode");
        assert_eq!(
            decoded,
            Decoded::Message {
                message: CodecMessage::Text("ls".into()),
                consumed: 4,
            }
        );
    }

    #[test]
    fn oversized_line_is_rejected() {
        let codec = LineCodec::new(4);

        assert_eq!(codec.decode(b"status"), Err(FallbackError::LineTooLong(4)));
        assert_eq!(codec.encode("status"), Err(FallbackError::LineTooLong(4)));
    }

    #[test]
    fn encoded_text_is_crlf_terminated() {
        let codec = LineCodec::default();
        assert_eq!(codec.encode("ok").expect("encode"), b"ok\r\n".to_vec());
    }
}

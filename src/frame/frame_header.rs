use crate::{
    constants::{FRAME_HEADER_LENGTH_OFFSET, FRAME_MAGIC, FRAME_VERSION},
    frame::FrameDecodeError,
    protocol::BinaryReader,
};

/// The fixed part of a frame: magic and total length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePrefix {
    pub magic: u16,
    /// Bytes from the header length field through the end of the body.
    pub total_length: usize,
}

impl FramePrefix {
    /// Size of the whole frame, prefix included.
    pub fn frame_length(&self) -> usize {
        FRAME_HEADER_LENGTH_OFFSET + self.total_length
    }
}

/// A fully parsed frame header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameHeader {
    pub total_length: usize,
    /// Bytes from the version field through the end of the correlation id.
    pub header_length: usize,
    pub version: u8,
    pub service: String,
    pub correlation_id: i64,
}

impl FrameHeader {
    /// Reads magic and total length. Fails on a magic mismatch.
    ///
    /// The caller compares `total_length` with what is buffered and asks
    /// for more input instead of reading on.
    pub fn read_prefix(reader: &mut BinaryReader<'_>) -> Result<FramePrefix, FrameDecodeError> {
        let magic = reader.read_i16()? as u16;
        if magic != FRAME_MAGIC {
            return Err(FrameDecodeError::BadMagic(magic));
        }

        let total_length = reader.read_i32()?;
        if total_length < 0 {
            return Err(FrameDecodeError::NegativeLength(total_length));
        }

        Ok(FramePrefix {
            magic,
            total_length: total_length as usize,
        })
    }

    /// Reads the remainder of the header following [`FrameHeader::read_prefix`].
    pub fn read_rest(
        reader: &mut BinaryReader<'_>,
        prefix: FramePrefix,
    ) -> Result<FrameHeader, FrameDecodeError> {
        let header_length = reader.read_i16()? as u16 as usize;
        if header_length > prefix.total_length {
            return Err(FrameDecodeError::HeaderOverrun {
                header_length,
                total_length: prefix.total_length,
            });
        }

        let version_start = reader.position();

        let version = reader.read_byte()? as u8;
        if version != FRAME_VERSION {
            return Err(FrameDecodeError::UnsupportedVersion(version));
        }

        let service = reader.read_string()?;
        let correlation_id = reader.read_i64()?;

        let actual = reader.position() - version_start;
        if actual != header_length {
            return Err(FrameDecodeError::MalformedHeader {
                declared: header_length,
                actual,
            });
        }

        Ok(FrameHeader {
            total_length: prefix.total_length,
            header_length,
            version,
            service,
            correlation_id,
        })
    }
}

use crate::{
    constants::{
        FRAME_HEADER_LENGTH_OFFSET, FRAME_HEADER_LENGTH_PLACEHOLDER, FRAME_MAGIC,
        FRAME_TOTAL_LENGTH_OFFSET, FRAME_TOTAL_LENGTH_PLACEHOLDER, FRAME_VERSION,
        FRAME_VERSION_OFFSET,
    },
    protocol::{BinaryWriter, CursorGuard, ProtocolError},
};

/// Two-pass frame header writer.
///
/// [`FrameHeaderWriter::begin`] emits the header with placeholder lengths and
/// remembers where they are; once the body has been written,
/// [`FrameHeaderWriter::finish`] backfills the real lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeaderWriter {
    start: usize,
    header_end: usize,
}

impl FrameHeaderWriter {
    pub fn begin(
        writer: &mut BinaryWriter,
        service: &str,
        correlation_id: i64,
    ) -> Result<Self, ProtocolError> {
        let start = writer.position();

        writer.write_i16(FRAME_MAGIC as i16);
        writer.write_i32(FRAME_TOTAL_LENGTH_PLACEHOLDER);
        writer.write_i16(FRAME_HEADER_LENGTH_PLACEHOLDER);
        writer.write_byte(FRAME_VERSION as i8);
        writer.write_string(service)?;
        writer.write_i64(correlation_id);

        Ok(Self {
            start,
            header_end: writer.position(),
        })
    }

    /// Bytes covered by the header length field.
    pub fn header_length(&self) -> usize {
        self.header_end - (self.start + FRAME_VERSION_OFFSET)
    }

    /// Overwrites both placeholders. The cursor is back at the end of the
    /// buffer afterwards, whether or not the backfill succeeded.
    pub fn finish(self, writer: &mut BinaryWriter) -> Result<(), ProtocolError> {
        let mut cursor = CursorGuard::at_end(writer);

        let counted = cursor.len() - (self.start + FRAME_HEADER_LENGTH_OFFSET);
        let total_length = i32::try_from(counted).map_err(|_| ProtocolError::SizeLimit(counted))?;

        let header_length = self.header_length();
        let header_length = u16::try_from(header_length)
            .map_err(|_| ProtocolError::SizeLimit(header_length))?;

        cursor.set_position(self.start + FRAME_TOTAL_LENGTH_OFFSET);
        cursor.write_i32(total_length);
        cursor.set_position(self.start + FRAME_HEADER_LENGTH_OFFSET);
        cursor.write_i16(header_length as i16);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        frame::{FrameDecodeError, FrameHeader},
        protocol::BinaryReader,
    };

    fn framed(service: &str, id: i64, body: &[u8]) -> Vec<u8> {
        let mut writer = BinaryWriter::new();
        let header = FrameHeaderWriter::begin(&mut writer, service, id).expect("begin header");
        for byte in body {
            writer.write_byte(*byte as i8);
        }
        header.finish(&mut writer).expect("finish header");
        writer.into_bytes()
    }

    #[test]
    fn placeholders_are_backfilled() {
        let bytes = framed("tutorial.Calc", 11, b"body");

        // magic, total, header length, version
        assert_eq!(&bytes[..2], &[0xda, 0xbc]);
        let total = i32::from_be_bytes(bytes[2..6].try_into().expect("total field"));
        let header = i16::from_be_bytes(bytes[6..8].try_into().expect("header field"));

        assert_eq!(total as usize, bytes.len() - 6);
        assert_eq!(header as usize, 1 + 4 + "tutorial.Calc".len() + 8);
        assert!(header as i32 <= total);
        assert_eq!(&bytes[bytes.len() - 4..], b"body");
    }

    #[test]
    fn header_reads_back() {
        let bytes = framed("svc", -5, &[]);
        let mut reader = BinaryReader::new(&bytes);

        let prefix = FrameHeader::read_prefix(&mut reader).expect("prefix");
        assert_eq!(prefix.frame_length(), bytes.len());

        let header = FrameHeader::read_rest(&mut reader, prefix).expect("header");
        assert_eq!(header.service, "svc");
        assert_eq!(header.correlation_id, -5);
        assert_eq!(header.version, FRAME_VERSION);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn cursor_ends_at_buffer_end() {
        let mut writer = BinaryWriter::new();
        let header = FrameHeaderWriter::begin(&mut writer, "svc", 1).expect("begin header");
        writer.write_i32(0);
        let end = writer.len();

        header.finish(&mut writer).expect("finish header");
        assert_eq!(writer.position(), end);
    }

    #[test]
    fn bad_magic_is_rejected() {
        let mut bytes = framed("svc", 1, b"x");
        bytes[0] = 0xab;
        bytes[1] = 0xcd;

        assert_eq!(
            FrameHeader::read_prefix(&mut BinaryReader::new(&bytes)),
            Err(FrameDecodeError::BadMagic(0xabcd))
        );
    }

    #[test]
    fn inconsistent_header_length_is_rejected() {
        let mut bytes = framed("svc", 1, b"xyz");
        bytes[7] += 1;

        let mut reader = BinaryReader::new(&bytes);
        let prefix = FrameHeader::read_prefix(&mut reader).expect("prefix");

        assert!(matches!(
            FrameHeader::read_rest(&mut reader, prefix),
            Err(FrameDecodeError::MalformedHeader { .. })
        ));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let mut bytes = framed("svc", 1, b"");
        bytes[8] = 2;

        let mut reader = BinaryReader::new(&bytes);
        let prefix = FrameHeader::read_prefix(&mut reader).expect("prefix");

        assert_eq!(
            FrameHeader::read_rest(&mut reader, prefix),
            Err(FrameDecodeError::UnsupportedVersion(2))
        );
    }
}

use crate::{
    constants::{PROTOCOL_MAX_DEPTH, PROTOCOL_VERSION_1, PROTOCOL_VERSION_MASK},
    protocol::{FieldType, MessageEnvelope, MessageKind, ProtocolError},
};

/// Big-endian binary protocol reader over an in-memory buffer.
///
/// The reader never blocks: running out of bytes is reported as
/// [`ProtocolError::UnexpectedEof`] and callers decide whether that means
/// "need more input" or a malformed message.
#[derive(Debug)]
pub struct BinaryReader<'a> {
    buf: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> BinaryReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            depth: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], ProtocolError> {
        if self.remaining() < len {
            return Err(ProtocolError::UnexpectedEof {
                needed: len - self.remaining(),
            });
        }
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], ProtocolError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read_bool(&mut self) -> Result<bool, ProtocolError> {
        Ok(self.read_byte()? != 0)
    }

    pub fn read_byte(&mut self) -> Result<i8, ProtocolError> {
        Ok(i8::from_be_bytes(self.take_array()?))
    }

    pub fn read_i16(&mut self) -> Result<i16, ProtocolError> {
        Ok(i16::from_be_bytes(self.take_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32, ProtocolError> {
        Ok(i32::from_be_bytes(self.take_array()?))
    }

    pub fn read_i64(&mut self) -> Result<i64, ProtocolError> {
        Ok(i64::from_be_bytes(self.take_array()?))
    }

    pub fn read_double(&mut self) -> Result<f64, ProtocolError> {
        Ok(f64::from_bits(u64::from_be_bytes(self.take_array()?)))
    }

    pub fn read_binary(&mut self) -> Result<Vec<u8>, ProtocolError> {
        let len = self.read_size()?;
        Ok(self.take(len)?.to_vec())
    }

    pub fn read_string(&mut self) -> Result<String, ProtocolError> {
        String::from_utf8(self.read_binary()?).map_err(|_| ProtocolError::InvalidUtf8)
    }

    /// Reads a message header in either strict (versioned) or legacy form.
    pub fn read_message_begin(&mut self) -> Result<MessageEnvelope, ProtocolError> {
        let size = self.read_i32()?;

        if size < 0 {
            let bits = size as u32;
            if bits & PROTOCOL_VERSION_MASK != PROTOCOL_VERSION_1 {
                return Err(ProtocolError::BadVersion(bits));
            }
            let kind = Self::message_kind((bits & 0xff) as u8)?;
            let name = self.read_string()?;
            let seq_id = self.read_i32()?;
            Ok(MessageEnvelope { name, kind, seq_id })
        } else {
            // Legacy header: the first word is the length of the name
            let name = String::from_utf8(self.take(size as usize)?.to_vec())
                .map_err(|_| ProtocolError::InvalidUtf8)?;
            let kind = Self::message_kind(self.read_byte()? as u8)?;
            let seq_id = self.read_i32()?;
            Ok(MessageEnvelope { name, kind, seq_id })
        }
    }

    fn message_kind(raw: u8) -> Result<MessageKind, ProtocolError> {
        MessageKind::try_from(raw).map_err(|_| ProtocolError::UnknownMessageKind(raw))
    }

    pub fn read_message_end(&mut self) {}

    /// Enters a nested struct or container, enforcing the depth limit.
    pub fn read_struct_begin(&mut self) -> Result<(), ProtocolError> {
        self.depth += 1;
        if self.depth > PROTOCOL_MAX_DEPTH {
            return Err(ProtocolError::DepthLimit);
        }
        Ok(())
    }

    pub fn read_struct_end(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Returns the field's type tag and id. A `Stop` tag carries id 0.
    pub fn read_field_begin(&mut self) -> Result<(FieldType, i16), ProtocolError> {
        let field_type = self.read_field_type()?;
        if field_type == FieldType::Stop {
            return Ok((FieldType::Stop, 0));
        }
        let id = self.read_i16()?;
        Ok((field_type, id))
    }

    pub fn read_list_begin(&mut self) -> Result<(FieldType, usize), ProtocolError> {
        let element = self.read_field_type()?;
        let len = self.read_container_size()?;
        Ok((element, len))
    }

    pub fn read_set_begin(&mut self) -> Result<(FieldType, usize), ProtocolError> {
        self.read_list_begin()
    }

    pub fn read_map_begin(&mut self) -> Result<(FieldType, FieldType, usize), ProtocolError> {
        let key = self.read_field_type()?;
        let value = self.read_field_type()?;
        let len = self.read_container_size()?;
        Ok((key, value, len))
    }

    fn read_field_type(&mut self) -> Result<FieldType, ProtocolError> {
        let raw = self.read_byte()? as u8;
        FieldType::try_from(raw).map_err(|_| ProtocolError::UnknownType(raw))
    }

    fn read_size(&mut self) -> Result<usize, ProtocolError> {
        let size = self.read_i32()?;
        if size < 0 {
            return Err(ProtocolError::NegativeSize(size));
        }
        Ok(size as usize)
    }

    /// Element count of a container. Every element occupies at least one
    /// byte, so a count beyond the remaining input cannot be satisfied yet.
    fn read_container_size(&mut self) -> Result<usize, ProtocolError> {
        let len = self.read_size()?;
        if len > self.remaining() {
            return Err(ProtocolError::UnexpectedEof {
                needed: len - self.remaining(),
            });
        }
        Ok(len)
    }

    /// Skips over a value of the given type without materializing it.
    pub fn skip(&mut self, field_type: FieldType) -> Result<(), ProtocolError> {
        match field_type {
            FieldType::Stop | FieldType::Void => Err(ProtocolError::InvalidData(format!(
                "{field_type:?} does not carry a value"
            ))),
            FieldType::Bool | FieldType::Byte => self.take(1).map(|_| ()),
            FieldType::I16 => self.take(2).map(|_| ()),
            FieldType::I32 => self.take(4).map(|_| ()),
            FieldType::Double | FieldType::I64 => self.take(8).map(|_| ()),
            FieldType::String => {
                let len = self.read_size()?;
                self.take(len).map(|_| ())
            }
            FieldType::Struct => {
                self.read_struct_begin()?;
                loop {
                    let (field_type, _) = self.read_field_begin()?;
                    if field_type == FieldType::Stop {
                        break;
                    }
                    self.skip(field_type)?;
                }
                self.read_struct_end();
                Ok(())
            }
            FieldType::List | FieldType::Set => {
                let (element, len) = self.read_list_begin()?;
                self.read_struct_begin()?;
                for _ in 0..len {
                    self.skip(element)?;
                }
                self.read_struct_end();
                Ok(())
            }
            FieldType::Map => {
                let (key, value, len) = self.read_map_begin()?;
                self.read_struct_begin()?;
                for _ in 0..len {
                    self.skip(key)?;
                    self.skip(value)?;
                }
                self.read_struct_end();
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::BinaryWriter;

    #[test]
    fn reads_back_strict_envelope() {
        let mut writer = BinaryWriter::new();
        writer
            .write_message_begin(&MessageEnvelope::new("divide", MessageKind::Reply, 42))
            .expect("write envelope");

        let bytes = writer.into_bytes();
        let mut reader = BinaryReader::new(&bytes);
        let envelope = reader.read_message_begin().expect("read envelope");

        assert_eq!(envelope, MessageEnvelope::new("divide", MessageKind::Reply, 42));
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn reads_legacy_envelope() {
        let bytes = [0, 0, 0, 2, b'h', b'i', 1, 0, 0, 0, 9];
        let mut reader = BinaryReader::new(&bytes);
        let envelope = reader.read_message_begin().expect("read legacy envelope");

        assert_eq!(envelope, MessageEnvelope::new("hi", MessageKind::Call, 9));
    }

    #[test]
    fn rejects_unknown_version() {
        let bytes = [0x80, 0x02, 0x00, 0x01, 0, 0, 0, 0, 0, 0, 0, 0];
        let mut reader = BinaryReader::new(&bytes);

        assert_eq!(
            reader.read_message_begin(),
            Err(ProtocolError::BadVersion(0x8002_0001))
        );
    }

    #[test]
    fn short_input_reports_missing_bytes() {
        let mut reader = BinaryReader::new(&[0, 1]);

        assert_eq!(
            reader.read_i32(),
            Err(ProtocolError::UnexpectedEof { needed: 2 })
        );
    }

    #[test]
    fn negative_string_length_is_rejected() {
        let bytes = (-1i32).to_be_bytes();
        let mut reader = BinaryReader::new(&bytes);

        assert_eq!(reader.read_string(), Err(ProtocolError::NegativeSize(-1)));
    }

    #[test]
    fn skip_walks_nested_struct() {
        let mut writer = BinaryWriter::new();
        writer.write_field_begin(FieldType::List, 1);
        writer.write_list_begin(FieldType::I32, 2).expect("list header");
        writer.write_i32(1);
        writer.write_i32(2);
        writer.write_field_begin(FieldType::String, 2);
        writer.write_string("x").expect("string");
        writer.write_field_stop();
        writer.write_byte(0x55);

        let bytes = writer.into_bytes();
        let mut reader = BinaryReader::new(&bytes);
        reader.skip(FieldType::Struct).expect("skip struct");

        assert_eq!(reader.read_byte(), Ok(0x55));
    }

    #[test]
    fn valueless_elements_cannot_be_skipped() {
        let mut bytes = vec![u8::from(FieldType::Void)];
        bytes.extend_from_slice(&3i32.to_be_bytes());
        bytes.extend_from_slice(&[0, 0, 0]);
        let mut reader = BinaryReader::new(&bytes);

        assert!(matches!(
            reader.skip(FieldType::List),
            Err(ProtocolError::InvalidData(_))
        ));
        assert!(matches!(
            BinaryReader::new(&[]).skip(FieldType::Void),
            Err(ProtocolError::InvalidData(_))
        ));
    }

    #[test]
    fn container_length_is_bounded_by_input() {
        let mut bytes = vec![u8::from(FieldType::Void)];
        bytes.extend_from_slice(&i32::MAX.to_be_bytes());
        let mut reader = BinaryReader::new(&bytes);

        assert_eq!(
            reader.skip(FieldType::List),
            Err(ProtocolError::UnexpectedEof {
                needed: i32::MAX as usize
            })
        );

        let mut bytes = vec![u8::from(FieldType::I32), u8::from(FieldType::I32)];
        bytes.extend_from_slice(&1_000i32.to_be_bytes());
        bytes.extend_from_slice(&[0; 8]);
        let mut reader = BinaryReader::new(&bytes);

        assert_eq!(
            reader.read_map_begin(),
            Err(ProtocolError::UnexpectedEof { needed: 992 })
        );
    }

    #[test]
    fn depth_limit_stops_runaway_nesting() {
        let mut bytes = Vec::new();
        for _ in 0..(PROTOCOL_MAX_DEPTH + 1) {
            bytes.push(u8::from(FieldType::Struct));
            bytes.extend_from_slice(&1i16.to_be_bytes());
        }
        let mut reader = BinaryReader::new(&bytes);

        assert_eq!(reader.skip(FieldType::Struct), Err(ProtocolError::DepthLimit));
    }
}

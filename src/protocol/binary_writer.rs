use crate::{
    constants::PROTOCOL_VERSION_1,
    protocol::{FieldType, MessageEnvelope, ProtocolError},
};
use std::ops::{Deref, DerefMut};

/// Big-endian binary protocol writer over a growable, seekable buffer.
///
/// Writes happen at the cursor. Moving the cursor back and writing again
/// overwrites bytes in place, which is how frame length placeholders are
/// backfilled once the body size is known.
#[derive(Debug, Default)]
pub struct BinaryWriter {
    buf: Vec<u8>,
    pos: usize,
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            pos: 0,
        }
    }

    /// Number of bytes written so far (the high-water mark, not the cursor).
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Moves the write cursor. Positions past the end are clamped to the end.
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos.min(self.buf.len());
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    fn put(&mut self, bytes: &[u8]) {
        let end = self.pos + bytes.len();
        if end > self.buf.len() {
            self.buf.resize(end, 0);
        }
        self.buf[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
    }

    pub fn write_bool(&mut self, value: bool) {
        self.put(&[u8::from(value)]);
    }

    pub fn write_byte(&mut self, value: i8) {
        self.put(&value.to_be_bytes());
    }

    pub fn write_i16(&mut self, value: i16) {
        self.put(&value.to_be_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.put(&value.to_be_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.put(&value.to_be_bytes());
    }

    pub fn write_double(&mut self, value: f64) {
        self.put(&value.to_bits().to_be_bytes());
    }

    pub fn write_binary(&mut self, bytes: &[u8]) -> Result<(), ProtocolError> {
        self.write_size(bytes.len())?;
        self.put(bytes);
        Ok(())
    }

    pub fn write_string(&mut self, value: &str) -> Result<(), ProtocolError> {
        self.write_binary(value.as_bytes())
    }

    /// Writes a strict (versioned) message header.
    pub fn write_message_begin(&mut self, envelope: &MessageEnvelope) -> Result<(), ProtocolError> {
        let version_and_kind = PROTOCOL_VERSION_1 | u32::from(u8::from(envelope.kind));
        self.write_i32(version_and_kind as i32);
        self.write_string(&envelope.name)?;
        self.write_i32(envelope.seq_id);
        Ok(())
    }

    pub fn write_message_end(&mut self) {}

    pub fn write_struct_begin(&mut self) {}

    pub fn write_struct_end(&mut self) {}

    pub fn write_field_begin(&mut self, field_type: FieldType, id: i16) {
        self.put(&[u8::from(field_type)]);
        self.write_i16(id);
    }

    pub fn write_field_stop(&mut self) {
        self.put(&[u8::from(FieldType::Stop)]);
    }

    pub fn write_list_begin(&mut self, element: FieldType, len: usize) -> Result<(), ProtocolError> {
        self.put(&[u8::from(element)]);
        self.write_size(len)
    }

    pub fn write_set_begin(&mut self, element: FieldType, len: usize) -> Result<(), ProtocolError> {
        self.write_list_begin(element, len)
    }

    pub fn write_map_begin(
        &mut self,
        key: FieldType,
        value: FieldType,
        len: usize,
    ) -> Result<(), ProtocolError> {
        self.put(&[u8::from(key), u8::from(value)]);
        self.write_size(len)
    }

    fn write_size(&mut self, len: usize) -> Result<(), ProtocolError> {
        let len = i32::try_from(len).map_err(|_| ProtocolError::SizeLimit(len))?;
        self.write_i32(len);
        Ok(())
    }
}

/// Scoped cursor acquisition.
///
/// Remembers where the writer's cursor should end up and puts it back there
/// when dropped, so a backfill that fails halfway still leaves the cursor at
/// the end of the buffer.
pub struct CursorGuard<'a> {
    writer: &'a mut BinaryWriter,
    restore_to: usize,
}

impl<'a> CursorGuard<'a> {
    /// Acquires the cursor, restoring it to the current end of the buffer on drop.
    pub fn at_end(writer: &'a mut BinaryWriter) -> Self {
        let restore_to = writer.len();
        Self { writer, restore_to }
    }
}

impl Deref for CursorGuard<'_> {
    type Target = BinaryWriter;

    fn deref(&self) -> &BinaryWriter {
        self.writer
    }
}

impl DerefMut for CursorGuard<'_> {
    fn deref_mut(&mut self) -> &mut BinaryWriter {
        self.writer
    }
}

impl Drop for CursorGuard<'_> {
    fn drop(&mut self) {
        self.writer.set_position(self.restore_to);
    }
}

use crate::protocol::{BinaryReader, BinaryWriter, FieldType, ProtocolError};
use num_enum::{FromPrimitive, IntoPrimitive};
use std::fmt;

/// Category of a generic application-level failure.
#[repr(i32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, FromPrimitive, IntoPrimitive)]
pub enum ApplicationExceptionKind {
    #[default]
    Unknown = 0,
    UnknownMethod = 1,
    InvalidMessageType = 2,
    WrongMethodName = 3,
    BadSequenceId = 4,
    MissingResult = 5,
    InternalError = 6,
    ProtocolError = 7,
    InvalidTransform = 8,
    InvalidProtocol = 9,
    UnsupportedClientType = 10,
}

/// Generic failure carried by `Exception`-kind messages.
///
/// Unlike IDL-declared exceptions this has a fixed layout (field 1 is the
/// message, field 2 the kind) and is read without any generated type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationException {
    pub kind: ApplicationExceptionKind,
    pub message: String,
}

impl ApplicationException {
    const MESSAGE_FIELD_ID: i16 = 1;
    const KIND_FIELD_ID: i16 = 2;

    pub fn new(kind: ApplicationExceptionKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self, ProtocolError> {
        let mut exception = ApplicationException::new(ApplicationExceptionKind::Unknown, "");

        reader.read_struct_begin()?;
        loop {
            match reader.read_field_begin()? {
                (FieldType::Stop, _) => break,
                (FieldType::String, Self::MESSAGE_FIELD_ID) => {
                    exception.message = reader.read_string()?;
                }
                (FieldType::I32, Self::KIND_FIELD_ID) => {
                    exception.kind = ApplicationExceptionKind::from(reader.read_i32()?);
                }
                (other, _) => reader.skip(other)?,
            }
        }
        reader.read_struct_end();

        Ok(exception)
    }

    pub fn write(&self, writer: &mut BinaryWriter) -> Result<(), ProtocolError> {
        writer.write_struct_begin();
        if !self.message.is_empty() {
            writer.write_field_begin(FieldType::String, Self::MESSAGE_FIELD_ID);
            writer.write_string(&self.message)?;
        }
        writer.write_field_begin(FieldType::I32, Self::KIND_FIELD_ID);
        writer.write_i32(i32::from(self.kind));
        writer.write_field_stop();
        writer.write_struct_end();
        Ok(())
    }
}

impl fmt::Display for ApplicationException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ApplicationException {}

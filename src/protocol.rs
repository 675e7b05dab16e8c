mod application_exception;
mod binary_reader;
mod binary_writer;
mod field_type;
mod message_envelope;
mod message_kind;
mod protocol_error;

pub use application_exception::{ApplicationException, ApplicationExceptionKind};
pub use binary_reader::BinaryReader;
pub use binary_writer::{BinaryWriter, CursorGuard};
pub use field_type::FieldType;
pub use message_envelope::MessageEnvelope;
pub use message_kind::MessageKind;
pub use protocol_error::ProtocolError;

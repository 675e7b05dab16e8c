use crate::protocol::{BinaryReader, BinaryWriter, FieldType, ProtocolError};
use crate::value::Value;
use std::collections::BTreeMap;

/// A struct (or IDL exception) held as plain id-addressed fields.
///
/// Used for nested struct values and for declared exceptions, where the
/// codec only needs to carry the fields through, not interpret them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructValue {
    /// Generated type name. Empty when read without a declaration.
    pub type_name: String,
    pub fields: BTreeMap<i16, Value>,
}

impl StructValue {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, id: i16, value: Value) -> Self {
        self.fields.insert(id, value);
        self
    }

    pub fn field(&self, id: i16) -> Option<&Value> {
        self.fields.get(&id)
    }

    /// First string field, which by convention is an exception's message.
    pub fn message(&self) -> Option<&str> {
        self.fields.values().find_map(|value| match value {
            Value::String(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Reads a struct body, keeping every field by its wire type.
    pub fn read(reader: &mut BinaryReader<'_>, type_name: &str) -> Result<Self, ProtocolError> {
        let mut value = StructValue::new(type_name);

        reader.read_struct_begin()?;
        loop {
            let (field_type, id) = reader.read_field_begin()?;
            if field_type == FieldType::Stop {
                break;
            }
            value.fields.insert(id, Value::read_untyped(reader, field_type)?);
        }
        reader.read_struct_end();

        Ok(value)
    }

    pub fn write(&self, writer: &mut BinaryWriter) -> Result<(), ProtocolError> {
        writer.write_struct_begin();
        for (id, value) in &self.fields {
            writer.write_field_begin(value.field_type(), *id);
            value.write(writer)?;
        }
        writer.write_field_stop();
        writer.write_struct_end();
        Ok(())
    }
}

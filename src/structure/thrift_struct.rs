use crate::{
    protocol::{BinaryReader, BinaryWriter, FieldType, ProtocolError},
    structure::{FieldDescriptor, FieldError},
    value::Value,
};
use std::{fmt, sync::Arc};

/// Capability every generated struct provides to the codec.
///
/// Fields are addressed by id only; the codec never derives accessor names.
/// `read` and `write` have default implementations driven by `fields`,
/// `get` and `set`, which generated code may override with specialised ones.
pub trait ThriftStruct: fmt::Debug + Send {
    /// Fully qualified generated type name.
    fn type_name(&self) -> &str;

    /// Declared fields, in ascending id order.
    fn fields(&self) -> &[FieldDescriptor];

    fn field_for_id(&self, id: i16) -> Option<&FieldDescriptor> {
        self.fields().iter().find(|field| field.id == id)
    }

    /// Current value of a field; `None` when unset or undeclared.
    fn get(&self, id: i16) -> Option<Value>;

    fn set(&mut self, id: i16, value: Value) -> Result<(), FieldError>;

    fn read(&mut self, reader: &mut BinaryReader<'_>) -> Result<(), ProtocolError> {
        reader.read_struct_begin()?;
        loop {
            let (field_type, id) = reader.read_field_begin()?;
            if field_type == FieldType::Stop {
                break;
            }

            let declared = self
                .field_for_id(id)
                .filter(|field| field.value_type.field_type() == field_type)
                .map(|field| field.value_type.clone());

            match declared {
                Some(value_type) => {
                    let value = Value::read(reader, &value_type)?;
                    self.set(id, value)
                        .map_err(|err| ProtocolError::InvalidData(err.to_string()))?;
                }
                // Unknown or retyped fields are skipped for forward compatibility
                None => reader.skip(field_type)?,
            }
        }
        reader.read_struct_end();
        Ok(())
    }

    fn write(&self, writer: &mut BinaryWriter) -> Result<(), ProtocolError> {
        writer.write_struct_begin();
        for field in self.fields() {
            if let Some(value) = self.get(field.id) {
                writer.write_field_begin(field.value_type.field_type(), field.id);
                value.write(writer)?;
            }
        }
        writer.write_field_stop();
        writer.write_struct_end();
        Ok(())
    }
}

/// Runtime handle of a generated struct type.
pub trait StructType: Send + Sync {
    fn name(&self) -> &str;

    /// A fresh instance with every field unset.
    fn new_instance(&self) -> Box<dyn ThriftStruct>;
}

pub type StructTypeHandle = Arc<dyn StructType>;

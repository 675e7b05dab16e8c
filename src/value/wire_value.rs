use crate::protocol::{BinaryReader, BinaryWriter, FieldType, ProtocolError};
use crate::value::{StructValue, ValueType};

/// A dynamically typed value as carried in RPC arguments and results.
///
/// Containers record their element types so that empty containers can
/// still be written with the right wire tags.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Byte(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Double(f64),
    String(String),
    Binary(Vec<u8>),
    Struct(StructValue),
    /// A struct value declared as an IDL exception.
    Exception(StructValue),
    List(ValueType, Vec<Value>),
    Set(ValueType, Vec<Value>),
    Map(ValueType, ValueType, Vec<(Value, Value)>),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Bool(_) => ValueType::Bool,
            Value::Byte(_) => ValueType::Byte,
            Value::I16(_) => ValueType::I16,
            Value::I32(_) => ValueType::I32,
            Value::I64(_) => ValueType::I64,
            Value::Double(_) => ValueType::Double,
            Value::String(_) => ValueType::String,
            Value::Binary(_) => ValueType::Binary,
            Value::Struct(value) => ValueType::Struct(value.type_name.clone()),
            Value::Exception(value) => ValueType::Exception(value.type_name.clone()),
            Value::List(element, _) => ValueType::list_of(element.clone()),
            Value::Set(element, _) => ValueType::set_of(element.clone()),
            Value::Map(key, value, _) => ValueType::map_of(key.clone(), value.clone()),
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            Value::Bool(_) => FieldType::Bool,
            Value::Byte(_) => FieldType::Byte,
            Value::I16(_) => FieldType::I16,
            Value::I32(_) => FieldType::I32,
            Value::I64(_) => FieldType::I64,
            Value::Double(_) => FieldType::Double,
            Value::String(_) | Value::Binary(_) => FieldType::String,
            Value::Struct(_) | Value::Exception(_) => FieldType::Struct,
            Value::List(..) => FieldType::List,
            Value::Set(..) => FieldType::Set,
            Value::Map(..) => FieldType::Map,
        }
    }

    /// Writes the value body (no field header).
    pub fn write(&self, writer: &mut BinaryWriter) -> Result<(), ProtocolError> {
        match self {
            Value::Bool(v) => writer.write_bool(*v),
            Value::Byte(v) => writer.write_byte(*v),
            Value::I16(v) => writer.write_i16(*v),
            Value::I32(v) => writer.write_i32(*v),
            Value::I64(v) => writer.write_i64(*v),
            Value::Double(v) => writer.write_double(*v),
            Value::String(v) => writer.write_string(v)?,
            Value::Binary(v) => writer.write_binary(v)?,
            Value::Struct(v) | Value::Exception(v) => v.write(writer)?,
            Value::List(element, items) => {
                writer.write_list_begin(element.field_type(), items.len())?;
                for item in items {
                    item.write(writer)?;
                }
            }
            Value::Set(element, items) => {
                writer.write_set_begin(element.field_type(), items.len())?;
                for item in items {
                    item.write(writer)?;
                }
            }
            Value::Map(key, value, entries) => {
                writer.write_map_begin(key.field_type(), value.field_type(), entries.len())?;
                for (k, v) in entries {
                    k.write(writer)?;
                    v.write(writer)?;
                }
            }
        }
        Ok(())
    }

    /// Reads a value whose declared type is known.
    pub fn read(reader: &mut BinaryReader<'_>, ty: &ValueType) -> Result<Self, ProtocolError> {
        let value = match ty {
            ValueType::Bool => Value::Bool(reader.read_bool()?),
            ValueType::Byte => Value::Byte(reader.read_byte()?),
            ValueType::I16 => Value::I16(reader.read_i16()?),
            ValueType::I32 => Value::I32(reader.read_i32()?),
            ValueType::I64 => Value::I64(reader.read_i64()?),
            ValueType::Double => Value::Double(reader.read_double()?),
            ValueType::String => Value::String(reader.read_string()?),
            ValueType::Binary => Value::Binary(reader.read_binary()?),
            ValueType::Struct(name) => Value::Struct(StructValue::read(reader, name)?),
            ValueType::Exception(name) => Value::Exception(StructValue::read(reader, name)?),
            ValueType::List(element) => {
                let (tag, len) = reader.read_list_begin()?;
                Value::List(
                    (**element).clone(),
                    Self::read_elements(reader, element, tag, len)?,
                )
            }
            ValueType::Set(element) => {
                let (tag, len) = reader.read_set_begin()?;
                Value::Set(
                    (**element).clone(),
                    Self::read_elements(reader, element, tag, len)?,
                )
            }
            ValueType::Map(key, value) => {
                let (key_tag, value_tag, len) = reader.read_map_begin()?;
                Self::expect_tag(key, key_tag)?;
                Self::expect_tag(value, value_tag)?;

                reader.read_struct_begin()?;
                let mut entries = Vec::with_capacity(len.min(reader.remaining()));
                for _ in 0..len {
                    let k = Value::read(reader, key)?;
                    let v = Value::read(reader, value)?;
                    entries.push((k, v));
                }
                reader.read_struct_end();

                Value::Map((**key).clone(), (**value).clone(), entries)
            }
        };
        Ok(value)
    }

    fn read_elements(
        reader: &mut BinaryReader<'_>,
        element: &ValueType,
        tag: FieldType,
        len: usize,
    ) -> Result<Vec<Value>, ProtocolError> {
        Self::expect_tag(element, tag)?;

        reader.read_struct_begin()?;
        // Capacity is bounded by the input so a forged length cannot over-allocate
        let mut items = Vec::with_capacity(len.min(reader.remaining()));
        for _ in 0..len {
            items.push(Value::read(reader, element)?);
        }
        reader.read_struct_end();

        Ok(items)
    }

    fn expect_tag(ty: &ValueType, found: FieldType) -> Result<(), ProtocolError> {
        if ty.field_type() != found {
            return Err(ProtocolError::InvalidData(format!(
                "expected {ty} elements, found {found:?}"
            )));
        }
        Ok(())
    }

    /// Reads a value known only by its wire tag.
    pub fn read_untyped(
        reader: &mut BinaryReader<'_>,
        field_type: FieldType,
    ) -> Result<Self, ProtocolError> {
        let value = match field_type {
            FieldType::Stop | FieldType::Void => {
                return Err(ProtocolError::InvalidData(format!(
                    "{field_type:?} does not carry a value"
                )));
            }
            FieldType::Bool => Value::Bool(reader.read_bool()?),
            FieldType::Byte => Value::Byte(reader.read_byte()?),
            FieldType::I16 => Value::I16(reader.read_i16()?),
            FieldType::I32 => Value::I32(reader.read_i32()?),
            FieldType::I64 => Value::I64(reader.read_i64()?),
            FieldType::Double => Value::Double(reader.read_double()?),
            FieldType::String => match String::from_utf8(reader.read_binary()?) {
                Ok(text) => Value::String(text),
                Err(err) => Value::Binary(err.into_bytes()),
            },
            FieldType::Struct => Value::Struct(StructValue::read(reader, "")?),
            FieldType::List | FieldType::Set => {
                let (tag, len) = reader.read_list_begin()?;
                let items = Self::read_untyped_elements(reader, tag, len)?;
                let element = Self::element_type(tag, items.first());
                if field_type == FieldType::List {
                    Value::List(element, items)
                } else {
                    Value::Set(element, items)
                }
            }
            FieldType::Map => {
                let (key_tag, value_tag, len) = reader.read_map_begin()?;

                reader.read_struct_begin()?;
                let mut entries = Vec::with_capacity(len.min(reader.remaining()));
                for _ in 0..len {
                    let k = Value::read_untyped(reader, key_tag)?;
                    let v = Value::read_untyped(reader, value_tag)?;
                    entries.push((k, v));
                }
                reader.read_struct_end();

                let first = entries.first();
                Value::Map(
                    Self::element_type(key_tag, first.map(|(k, _)| k)),
                    Self::element_type(value_tag, first.map(|(_, v)| v)),
                    entries,
                )
            }
        };
        Ok(value)
    }

    fn read_untyped_elements(
        reader: &mut BinaryReader<'_>,
        tag: FieldType,
        len: usize,
    ) -> Result<Vec<Value>, ProtocolError> {
        reader.read_struct_begin()?;
        let mut items = Vec::with_capacity(len.min(reader.remaining()));
        for _ in 0..len {
            items.push(Value::read_untyped(reader, tag)?);
        }
        reader.read_struct_end();
        Ok(items)
    }

    fn element_type(tag: FieldType, sample: Option<&Value>) -> ValueType {
        match sample {
            Some(value) => value.value_type(),
            None => ValueType::from_wire(tag).unwrap_or(ValueType::Binary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(value: &Value) -> Value {
        let mut writer = BinaryWriter::new();
        value.write(&mut writer).expect("write value");
        let bytes = writer.into_bytes();
        Value::read(&mut BinaryReader::new(&bytes), &value.value_type()).expect("read value")
    }

    #[test]
    fn nested_containers_keep_their_shape() {
        let value = Value::Map(
            ValueType::String,
            ValueType::list_of(ValueType::I64),
            vec![
                (
                    Value::String("primes".into()),
                    Value::List(ValueType::I64, vec![Value::I64(2), Value::I64(3)]),
                ),
                (
                    Value::String("empty".into()),
                    Value::List(ValueType::I64, vec![]),
                ),
            ],
        );

        assert_eq!(round_trip(&value), value);
    }

    #[test]
    fn struct_values_read_with_declared_name() {
        let value = Value::Struct(
            StructValue::new("shared.Point")
                .with_field(1, Value::Double(1.5))
                .with_field(2, Value::Double(-3.0)),
        );

        assert_eq!(round_trip(&value), value);
    }

    #[test]
    fn declared_list_type_rejects_other_element_tags() {
        let mut writer = BinaryWriter::new();
        Value::List(ValueType::I32, vec![Value::I32(1)])
            .write(&mut writer)
            .expect("write list");
        let bytes = writer.into_bytes();

        let result = Value::read(
            &mut BinaryReader::new(&bytes),
            &ValueType::list_of(ValueType::String),
        );
        assert!(matches!(result, Err(ProtocolError::InvalidData(_))));
    }

    #[test]
    fn untyped_string_falls_back_to_binary() {
        let mut writer = BinaryWriter::new();
        writer.write_binary(&[0xff, 0xfe]).expect("write binary");
        let bytes = writer.into_bytes();

        let value = Value::read_untyped(&mut BinaryReader::new(&bytes), FieldType::String)
            .expect("read untyped");
        assert_eq!(value, Value::Binary(vec![0xff, 0xfe]));
    }

    #[test]
    fn accepts_checks_struct_names() {
        let ty = ValueType::Exception("tutorial.DivideByZero".into());

        assert!(ty.accepts(&Value::Exception(StructValue::new("tutorial.DivideByZero"))));
        assert!(!ty.accepts(&Value::Exception(StructValue::new("tutorial.Overflow"))));
        assert!(!ty.accepts(&Value::Struct(StructValue::new("tutorial.DivideByZero"))));
        assert!(!ValueType::I32.accepts(&Value::I64(1)));
    }
}

use crate::protocol::FieldType;
use crate::value::Value;
use std::fmt;

/// Declared (static) type of a struct field or RPC parameter.
///
/// Struct and exception types carry the generated type name so that an
/// outgoing exception can be matched against a result struct's declared
/// exception slots.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    Bool,
    Byte,
    I16,
    I32,
    I64,
    Double,
    String,
    Binary,
    Struct(String),
    Exception(String),
    List(Box<ValueType>),
    Set(Box<ValueType>),
    Map(Box<ValueType>, Box<ValueType>),
}

impl ValueType {
    pub fn list_of(element: ValueType) -> Self {
        ValueType::List(Box::new(element))
    }

    pub fn set_of(element: ValueType) -> Self {
        ValueType::Set(Box::new(element))
    }

    pub fn map_of(key: ValueType, value: ValueType) -> Self {
        ValueType::Map(Box::new(key), Box::new(value))
    }

    /// The wire tag this type is written with.
    pub fn field_type(&self) -> FieldType {
        match self {
            ValueType::Bool => FieldType::Bool,
            ValueType::Byte => FieldType::Byte,
            ValueType::I16 => FieldType::I16,
            ValueType::I32 => FieldType::I32,
            ValueType::I64 => FieldType::I64,
            ValueType::Double => FieldType::Double,
            ValueType::String | ValueType::Binary => FieldType::String,
            ValueType::Struct(_) | ValueType::Exception(_) => FieldType::Struct,
            ValueType::List(_) => FieldType::List,
            ValueType::Set(_) => FieldType::Set,
            ValueType::Map(_, _) => FieldType::Map,
        }
    }

    /// Best-effort type for a wire tag seen without a declaration.
    ///
    /// Container element types are unknown at this point and reported as
    /// binary; readers refine them from the elements they actually decode.
    pub fn from_wire(field_type: FieldType) -> Option<Self> {
        let ty = match field_type {
            FieldType::Stop | FieldType::Void => return None,
            FieldType::Bool => ValueType::Bool,
            FieldType::Byte => ValueType::Byte,
            FieldType::I16 => ValueType::I16,
            FieldType::I32 => ValueType::I32,
            FieldType::I64 => ValueType::I64,
            FieldType::Double => ValueType::Double,
            FieldType::String => ValueType::String,
            FieldType::Struct => ValueType::Struct(String::new()),
            FieldType::List => ValueType::list_of(ValueType::Binary),
            FieldType::Set => ValueType::set_of(ValueType::Binary),
            FieldType::Map => ValueType::map_of(ValueType::Binary, ValueType::Binary),
        };
        Some(ty)
    }

    /// Whether `value` may be stored in a slot of this type.
    ///
    /// Struct values with an empty type name were read without a
    /// declaration and are accepted by any struct slot of the same shape.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (ValueType::Struct(expected), Value::Struct(found))
            | (ValueType::Exception(expected), Value::Exception(found)) => {
                found.type_name.is_empty() || *expected == found.type_name
            }
            (ValueType::Struct(_), Value::Exception(_)) => false,
            (ValueType::String, Value::Binary(_)) | (ValueType::Binary, Value::String(_)) => true,
            (ValueType::List(expected), Value::List(element, items))
            | (ValueType::Set(expected), Value::Set(element, items)) => {
                **expected == *element && items.iter().all(|item| expected.accepts(item))
            }
            (ValueType::Map(key_type, value_type), Value::Map(found_key, found_value, entries)) => {
                **key_type == *found_key
                    && **value_type == *found_value
                    && entries
                        .iter()
                        .all(|(k, v)| key_type.accepts(k) && value_type.accepts(v))
            }
            (expected, found) => *expected == found.value_type(),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Bool => f.write_str("bool"),
            ValueType::Byte => f.write_str("byte"),
            ValueType::I16 => f.write_str("i16"),
            ValueType::I32 => f.write_str("i32"),
            ValueType::I64 => f.write_str("i64"),
            ValueType::Double => f.write_str("double"),
            ValueType::String => f.write_str("string"),
            ValueType::Binary => f.write_str("binary"),
            ValueType::Struct(name) => write!(f, "struct {name}"),
            ValueType::Exception(name) => write!(f, "exception {name}"),
            ValueType::List(element) => write!(f, "list<{element}>"),
            ValueType::Set(element) => write!(f, "set<{element}>"),
            ValueType::Map(key, value) => write!(f, "map<{key}, {value}>"),
        }
    }
}

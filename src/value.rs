mod struct_value;
mod value_type;
mod wire_value;

pub use struct_value::StructValue;
pub use value_type::ValueType;
pub use wire_value::Value;

mod dynamic_struct;
mod field_descriptor;
mod generated_type;
mod thrift_struct;

pub use dynamic_struct::{DynamicStruct, StructSchema};
pub use field_descriptor::{FieldDescriptor, FieldError};
pub use generated_type::GeneratedType;
pub use thrift_struct::{StructType, StructTypeHandle, ThriftStruct};

use crate::{
    structure::{FieldDescriptor, FieldError, StructType, StructTypeHandle, ThriftStruct},
    value::{Value, ValueType},
};
use std::{collections::BTreeMap, sync::Arc};

/// Schema for a struct type described at runtime instead of compiled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructSchema {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl StructSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Adds (or replaces) a field, keeping fields ordered by id.
    pub fn field(mut self, id: i16, name: impl Into<String>, value_type: ValueType) -> Self {
        self.fields.retain(|field| field.id != id);
        self.fields.push(FieldDescriptor::new(id, name, value_type));
        self.fields.sort_by_key(|field| field.id);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn into_handle(self) -> StructTypeHandle {
        Arc::new(DynamicStructType {
            schema: Arc::new(self),
        })
    }
}

struct DynamicStructType {
    schema: Arc<StructSchema>,
}

impl StructType for DynamicStructType {
    fn name(&self) -> &str {
        &self.schema.name
    }

    fn new_instance(&self) -> Box<dyn ThriftStruct> {
        Box::new(DynamicStruct::new(Arc::clone(&self.schema)))
    }
}

/// Instance of a [`StructSchema`], validating values against declared types.
#[derive(Debug, Clone)]
pub struct DynamicStruct {
    schema: Arc<StructSchema>,
    values: BTreeMap<i16, Value>,
}

impl DynamicStruct {
    pub fn new(schema: Arc<StructSchema>) -> Self {
        Self {
            schema,
            values: BTreeMap::new(),
        }
    }
}

impl ThriftStruct for DynamicStruct {
    fn type_name(&self) -> &str {
        &self.schema.name
    }

    fn fields(&self) -> &[FieldDescriptor] {
        &self.schema.fields
    }

    fn get(&self, id: i16) -> Option<Value> {
        self.values.get(&id).cloned()
    }

    fn set(&mut self, id: i16, value: Value) -> Result<(), FieldError> {
        let field = self.field_for_id(id).ok_or(FieldError::UnknownField(id))?;

        if !field.value_type.accepts(&value) {
            return Err(FieldError::TypeMismatch {
                id,
                expected: field.value_type.clone(),
                found: value.value_type(),
            });
        }

        self.values.insert(id, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{BinaryReader, BinaryWriter};

    fn schema() -> StructSchema {
        StructSchema::new("shared.Tag")
            .field(2, "weights", ValueType::list_of(ValueType::Double))
            .field(1, "label", ValueType::String)
    }

    #[test]
    fn fields_are_kept_in_id_order() {
        let ids: Vec<i16> = schema().fields().iter().map(|field| field.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn set_rejects_wrong_types_and_unknown_ids() {
        let handle = schema().into_handle();
        let mut tag = handle.new_instance();

        assert_eq!(
            tag.set(1, Value::I32(1)),
            Err(FieldError::TypeMismatch {
                id: 1,
                expected: ValueType::String,
                found: ValueType::I32,
            })
        );
        assert_eq!(
            tag.set(7, Value::Bool(true)),
            Err(FieldError::UnknownField(7))
        );
    }

    #[test]
    fn write_then_read_restores_values_and_skips_unknown_fields() {
        let handle = schema().into_handle();
        let mut tag = handle.new_instance();
        tag.set(1, Value::String("hot".into())).expect("set label");
        tag.set(
            2,
            Value::List(ValueType::Double, vec![Value::Double(0.25)]),
        )
        .expect("set weights");

        let mut writer = BinaryWriter::new();
        tag.write(&mut writer).expect("write struct");
        let bytes = writer.into_bytes();

        let narrower = StructSchema::new("shared.Tag")
            .field(1, "label", ValueType::String)
            .into_handle();
        let mut decoded = narrower.new_instance();
        decoded
            .read(&mut BinaryReader::new(&bytes))
            .expect("read struct");

        assert_eq!(decoded.get(1), Some(Value::String("hot".into())));
        assert_eq!(decoded.get(2), None);
    }
}

use crate::{
    pending_calls::PendingCall,
    protocol::{
        ApplicationException, ApplicationExceptionKind, BinaryWriter, MessageEnvelope,
        MessageKind, ProtocolError,
    },
    rpc::{Invocation, RpcException, RpcResult},
    structure::ThriftStruct,
    translator::{BodyTranslator, SerializationError},
    value::{Value, ValueType},
};

/// Body of an outgoing reply.
#[derive(Debug)]
pub enum ReplyBody {
    /// A filled result struct, sent as a `Reply`.
    Result(Box<dyn ThriftStruct>),

    /// A generic failure, sent as an `Exception`.
    Application(ApplicationException),
}

impl ReplyBody {
    pub fn kind(&self) -> MessageKind {
        match self {
            ReplyBody::Result(_) => MessageKind::Reply,
            ReplyBody::Application(_) => MessageKind::Exception,
        }
    }

    pub fn write(&self, writer: &mut BinaryWriter) -> Result<(), ProtocolError> {
        match self {
            ReplyBody::Result(result) => result.write(writer),
            ReplyBody::Application(exception) => exception.write(writer),
        }
    }
}

impl BodyTranslator<'_> {
    /// Writes the envelope and arguments struct of an outgoing call.
    pub fn encode_call(
        &self,
        writer: &mut BinaryWriter,
        invocation: &Invocation,
        seq_id: i32,
    ) -> Result<(), SerializationError> {
        let args = self.args_for_call(invocation)?;

        writer.write_message_begin(&MessageEnvelope::new(
            invocation.method.clone(),
            MessageKind::Call,
            seq_id,
        ))?;
        args.write(writer)?;
        writer.write_message_end();

        Ok(())
    }

    /// Fills the arguments struct: argument `i` goes to field `i + 1`.
    /// Absent arguments are skipped so the struct's own defaults apply.
    pub fn args_for_call(
        &self,
        invocation: &Invocation,
    ) -> Result<Box<dyn ThriftStruct>, SerializationError> {
        let type_name = self
            .naming
            .args_type_name(&invocation.service, &invocation.method)?;
        let mut args = self.instantiate(&type_name)?;

        for (index, argument) in invocation.arguments.iter().enumerate() {
            let Some(value) = argument else {
                continue;
            };

            let id = i16::try_from(index + 1)
                .map_err(|_| SerializationError::TooManyArguments(invocation.arguments.len()))?;

            let expected = match args.field_for_id(id) {
                Some(field) => field.value_type.clone(),
                None => {
                    return Err(SerializationError::MissingField {
                        type_name: type_name.clone(),
                        id,
                    });
                }
            };

            if let Some(declared) = invocation.parameter_types.get(index) {
                if *declared != expected {
                    return Err(SerializationError::ParameterTypeMismatch {
                        type_name: type_name.clone(),
                        index,
                        id,
                        declared: declared.clone(),
                        expected,
                    });
                }
            }

            args.set(id, value.clone())
                .map_err(|source| SerializationError::Field {
                    type_name: type_name.clone(),
                    source,
                })?;
        }

        Ok(args)
    }

    /// Writes the envelope and body answering `pending`, returning the kind used.
    pub fn encode_reply(
        &self,
        writer: &mut BinaryWriter,
        pending: &PendingCall,
        result: &RpcResult,
    ) -> Result<MessageKind, SerializationError> {
        let body = self.reply_for_result(pending, result)?;
        let kind = body.kind();

        writer.write_message_begin(&MessageEnvelope::new(
            pending.method.clone(),
            kind,
            pending.seq_id,
        ))?;
        body.write(writer)?;
        writer.write_message_end();

        Ok(kind)
    }

    /// Builds the reply body for an outcome.
    ///
    /// A declared exception goes into the result field whose exception type
    /// matches it by name; when no field matches, the failure degrades to a
    /// generic [`ApplicationException`] carrying its message. A success
    /// value goes into field 0.
    pub fn reply_for_result(
        &self,
        pending: &PendingCall,
        result: &RpcResult,
    ) -> Result<ReplyBody, SerializationError> {
        match result {
            RpcResult::Exception(RpcException::Application(exception)) => {
                Ok(ReplyBody::Application(exception.clone()))
            }
            RpcResult::Exception(RpcException::Declared(exception)) => {
                let (type_name, mut reply) = self.result_struct(pending)?;
                let slot = reply
                    .fields()
                    .iter()
                    .filter(|field| field.id > 0)
                    .find(|field| {
                        matches!(&field.value_type, ValueType::Exception(name) if *name == exception.type_name)
                    })
                    .map(|field| field.id);

                match slot {
                    Some(id) => {
                        reply
                            .set(id, Value::Exception(exception.clone()))
                            .map_err(|source| SerializationError::Field {
                                type_name: type_name.clone(),
                                source,
                            })?;
                        Ok(ReplyBody::Result(reply))
                    }
                    None => {
                        tracing::debug!(
                            "`{}` declares no slot for `{}`; sending a generic failure",
                            type_name,
                            exception.type_name
                        );
                        Ok(ReplyBody::Application(ApplicationException::new(
                            ApplicationExceptionKind::Unknown,
                            RpcException::Declared(exception.clone()).message(),
                        )))
                    }
                }
            }
            RpcResult::Value(None) => Ok(ReplyBody::Result(self.result_struct(pending)?.1)),
            RpcResult::Value(Some(value)) => {
                let (type_name, mut reply) = self.result_struct(pending)?;
                if reply.field_for_id(0).is_none() {
                    return Err(SerializationError::MissingField { type_name, id: 0 });
                }
                reply
                    .set(0, value.clone())
                    .map_err(|source| SerializationError::Field {
                        type_name: type_name.clone(),
                        source,
                    })?;
                Ok(ReplyBody::Result(reply))
            }
        }
    }

    fn result_struct(
        &self,
        pending: &PendingCall,
    ) -> Result<(String, Box<dyn ThriftStruct>), SerializationError> {
        let type_name = self
            .naming
            .result_type_name(&pending.service, &pending.method)?;
        let reply = self.instantiate(&type_name)?;
        Ok((type_name, reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        locator::StructTypeRegistry,
        naming::ThriftNaming,
        structure::{FieldError, StructSchema},
        type_cache::TypeCache,
        value::StructValue,
    };
    use std::sync::Arc;

    fn types() -> TypeCache {
        let registry = StructTypeRegistry::new()
            .with(
                StructSchema::new("tutorial.Calc$add_args")
                    .field(1, "a", ValueType::I32)
                    .field(2, "b", ValueType::I32)
                    .into_handle(),
            )
            .with(
                StructSchema::new("tutorial.Calc$divide_result")
                    .field(0, "success", ValueType::I64)
                    .field(1, "ouch", ValueType::Exception("tutorial.DivideByZero".into()))
                    .into_handle(),
            );
        TypeCache::new(Arc::new(registry))
    }

    fn divide() -> PendingCall {
        PendingCall {
            seq_id: 4,
            service: "tutorial.Calc".into(),
            method: "divide".into(),
        }
    }

    #[test]
    fn absent_arguments_are_left_unset() {
        let types = types();
        let translator = BodyTranslator::new(&ThriftNaming, &types);

        let invocation = Invocation::new("tutorial.Calc", "add")
            .with_absent(ValueType::I32)
            .with_argument(Value::I32(3));
        let args = translator.args_for_call(&invocation).expect("fill args");

        assert_eq!(args.get(1), None);
        assert_eq!(args.get(2), Some(Value::I32(3)));
    }

    #[test]
    fn surplus_arguments_have_no_field() {
        let types = types();
        let translator = BodyTranslator::new(&ThriftNaming, &types);

        let invocation = Invocation::new("tutorial.Calc", "add")
            .with_argument(Value::I32(1))
            .with_argument(Value::I32(2))
            .with_argument(Value::I32(3));

        assert_eq!(
            translator.args_for_call(&invocation).err(),
            Some(SerializationError::MissingField {
                type_name: "tutorial.Calc$add_args".into(),
                id: 3,
            })
        );
    }

    #[test]
    fn mistyped_arguments_are_rejected() {
        let types = types();
        let translator = BodyTranslator::new(&ThriftNaming, &types);

        let mut invocation = Invocation::new("tutorial.Calc", "add").with_argument(Value::I64(1));
        assert!(matches!(
            translator.args_for_call(&invocation).err(),
            Some(SerializationError::ParameterTypeMismatch { index: 0, id: 1, .. })
        ));

        // Without a declared type the struct's own setter catches it
        invocation.parameter_types.clear();
        assert!(matches!(
            translator.args_for_call(&invocation).err(),
            Some(SerializationError::Field {
                source: FieldError::TypeMismatch { id: 1, .. },
                ..
            })
        ));
    }

    #[test]
    fn declared_exception_fills_matching_slot() {
        let types = types();
        let translator = BodyTranslator::new(&ThriftNaming, &types);
        let failure = StructValue::new("tutorial.DivideByZero")
            .with_field(1, Value::String("divisor is zero".into()));

        let body = translator
            .reply_for_result(
                &divide(),
                &RpcResult::Exception(RpcException::Declared(failure.clone())),
            )
            .expect("build reply");

        assert_eq!(body.kind(), MessageKind::Reply);
        let ReplyBody::Result(result) = body else {
            panic!("expected a result struct");
        };
        assert_eq!(result.get(1), Some(Value::Exception(failure)));
    }

    #[test]
    fn undeclared_exception_degrades_to_application_failure() {
        let types = types();
        let translator = BodyTranslator::new(&ThriftNaming, &types);
        let failure = StructValue::new("tutorial.Overflow")
            .with_field(1, Value::String("too large".into()));

        let body = translator
            .reply_for_result(
                &divide(),
                &RpcResult::Exception(RpcException::Declared(failure)),
            )
            .expect("build reply");

        assert_eq!(body.kind(), MessageKind::Exception);
        let ReplyBody::Application(exception) = body else {
            panic!("expected a generic failure");
        };
        assert_eq!(exception.message, "too large");
    }

    #[test]
    fn unknown_result_type_is_a_resolution_failure() {
        let types = types();
        let translator = BodyTranslator::new(&ThriftNaming, &types);
        let pending = PendingCall {
            seq_id: 1,
            service: "tutorial.Calc".into(),
            method: "add".into(),
        };

        assert!(matches!(
            translator.reply_for_result(&pending, &RpcResult::value(Value::I32(5))),
            Err(SerializationError::ClassResolution(_))
        ));
    }

    #[test]
    fn application_failure_needs_no_result_type() {
        let types = types();
        let translator = BodyTranslator::new(&ThriftNaming, &types);
        let pending = PendingCall {
            seq_id: 2,
            service: "tutorial.Calc".into(),
            method: "multiply".into(),
        };

        let body = translator
            .reply_for_result(
                &pending,
                &RpcResult::Exception(RpcException::application("no such method")),
            )
            .expect("build reply");

        assert_eq!(body.kind(), MessageKind::Exception);
        assert!(!types.contains("tutorial.Calc$multiply_result"));
    }
}

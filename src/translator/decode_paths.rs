use crate::{
    protocol::{ApplicationException, BinaryReader, MessageEnvelope},
    rpc::{Invocation, RpcException, RpcResult},
    structure::ThriftStruct,
    translator::{BodyTranslator, SerializationError},
    value::Value,
};

impl BodyTranslator<'_> {
    /// Reads the arguments struct of a call and unpacks it into an [`Invocation`].
    pub fn decode_call(
        &self,
        reader: &mut BinaryReader<'_>,
        service: &str,
        envelope: &MessageEnvelope,
    ) -> Result<Invocation, SerializationError> {
        let type_name = self.naming.args_type_name(service, &envelope.name)?;
        let mut args = self.instantiate(&type_name)?;

        args.read(reader)?;
        reader.read_message_end();

        Ok(Self::invocation_from_args(
            service,
            &envelope.name,
            args.as_ref(),
        ))
    }

    /// Collects arguments from field id 1 upwards, stopping at the first id
    /// the struct does not declare.
    pub fn invocation_from_args(
        service: &str,
        method: &str,
        args: &dyn ThriftStruct,
    ) -> Invocation {
        let mut invocation = Invocation::new(service, method);

        for id in 1..=i16::MAX {
            let Some(field) = args.field_for_id(id) else {
                break;
            };
            invocation.parameter_types.push(field.value_type.clone());
            invocation.arguments.push(args.get(id));
        }

        invocation
    }

    /// Reads a result struct and extracts its populated outcome.
    pub fn decode_reply(
        &self,
        reader: &mut BinaryReader<'_>,
        service: &str,
        envelope: &MessageEnvelope,
    ) -> Result<RpcResult, SerializationError> {
        let type_name = self.naming.result_type_name(service, &envelope.name)?;
        let mut result = self.instantiate(&type_name)?;

        result.read(reader)?;
        reader.read_message_end();

        Ok(Self::outcome_from_result(result.as_ref()))
    }

    /// The first populated field wins: an exception value is a declared
    /// failure, anything else the success value. Nothing populated is a
    /// void success.
    ///
    /// Id 0 is absent from the result structs of void methods, so the scan
    /// moves on to id 1 in that case and stops at the first undeclared id
    /// after it.
    pub fn outcome_from_result(result: &dyn ThriftStruct) -> RpcResult {
        let success = result.field_for_id(0).map(|_| 0);
        let declared = (1..=i16::MAX).take_while(|id| result.field_for_id(*id).is_some());

        for id in success.into_iter().chain(declared) {
            match result.get(id) {
                Some(Value::Exception(exception)) => {
                    return RpcResult::Exception(RpcException::Declared(exception));
                }
                Some(value) => return RpcResult::Value(Some(value)),
                None => {}
            }
        }

        RpcResult::Value(None)
    }

    /// Reads the generic failure carried by an `Exception`-kind message.
    pub fn decode_exception(
        reader: &mut BinaryReader<'_>,
    ) -> Result<RpcResult, SerializationError> {
        let exception = ApplicationException::read(reader)?;
        reader.read_message_end();

        Ok(RpcResult::Exception(RpcException::Application(exception)))
    }
}

use crate::{
    codec::{
        ChannelConfig, CodecError, CodecMessage, ConfigError, Decoded, decode_state::DecodeState,
    },
    constants::{DEFAULT_ENCODE_BUFFER_CAPACITY, FRAME_MIN_LENGTH},
    fallback::{FallbackCodec, LineCodec},
    frame::{FrameHeader, FrameHeaderWriter},
    locator::TypeLocator,
    naming::{NamingRegistry, NamingStrategy},
    pending_calls::{PendingCall, PendingCalls},
    protocol::{BinaryReader, BinaryWriter, MessageEnvelope, MessageKind},
    rpc::{Request, Response},
    translator::{BodyTranslator, SerializationError},
    type_cache::TypeCache,
    utils::SeqIdGenerator,
};
use std::sync::Arc;

/// Converts between transport bytes and [`CodecMessage`]s.
///
/// One codec is shared by every connection of an endpoint; per-connection
/// settings arrive with each call as a [`ChannelConfig`]. All state (type
/// cache, pending calls, sequence ids) lives in the instance.
pub struct ThriftCodec {
    naming: NamingRegistry,
    types: TypeCache,
    pending: PendingCalls,
    seq_ids: SeqIdGenerator,
    fallback: Box<dyn FallbackCodec>,
}

impl ThriftCodec {
    pub fn new(locator: Arc<dyn TypeLocator>) -> Self {
        Self {
            naming: NamingRegistry::default(),
            types: TypeCache::new(locator),
            pending: PendingCalls::new(),
            seq_ids: SeqIdGenerator::new(),
            fallback: Box::new(LineCodec::default()),
        }
    }

    pub fn with_naming_registry(mut self, naming: NamingRegistry) -> Self {
        self.naming = naming;
        self
    }

    pub fn with_fallback(mut self, fallback: Box<dyn FallbackCodec>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn types(&self) -> &TypeCache {
        &self.types
    }

    pub fn pending_calls(&self) -> &PendingCalls {
        &self.pending
    }

    pub fn naming_registry(&self) -> &NamingRegistry {
        &self.naming
    }

    pub fn encode(
        &self,
        config: &ChannelConfig,
        message: &CodecMessage,
    ) -> Result<Vec<u8>, CodecError> {
        match message {
            CodecMessage::Request(request) => self.encode_request(config, request),
            CodecMessage::Response(response) => self.encode_response(config, response),
            CodecMessage::Text(text) => Ok(self.fallback.encode(text)?),
        }
    }

    fn encode_request(
        &self,
        config: &ChannelConfig,
        request: &Request,
    ) -> Result<Vec<u8>, CodecError> {
        let naming = self.naming.get(&config.naming)?;
        let translator = BodyTranslator::new(naming.as_ref(), &self.types);
        let invocation = &request.invocation;
        let mut writer = BinaryWriter::with_capacity(DEFAULT_ENCODE_BUFFER_CAPACITY);

        tracing::debug!(
            "encoding call {} to `{}.{}`",
            request.id,
            invocation.service,
            invocation.method
        );

        if config.native {
            // The envelope's sequence id is the only correlation on the wire
            let seq_id = i32::try_from(request.id)
                .map_err(|_| SerializationError::CorrelationOutOfRange(request.id))?;
            translator.encode_call(&mut writer, invocation, seq_id)?;
        } else {
            if invocation.service.is_empty() {
                return Err(SerializationError::MissingService.into());
            }
            let header = FrameHeaderWriter::begin(&mut writer, &invocation.service, request.id)?;
            translator.encode_call(&mut writer, invocation, self.seq_ids.next_id())?;
            header.finish(&mut writer)?;
        }

        Ok(writer.into_bytes())
    }

    fn encode_response(
        &self,
        config: &ChannelConfig,
        response: &Response,
    ) -> Result<Vec<u8>, CodecError> {
        let pending = self
            .pending
            .get(response.id)
            .ok_or(SerializationError::UnknownCorrelation(response.id))?;

        let naming = self.naming.get(&config.naming)?;
        let translator = BodyTranslator::new(naming.as_ref(), &self.types);
        let mut writer = BinaryWriter::with_capacity(DEFAULT_ENCODE_BUFFER_CAPACITY);

        let kind = if config.native {
            translator.encode_reply(&mut writer, &pending, &response.result)?
        } else {
            let header = FrameHeaderWriter::begin(&mut writer, &pending.service, response.id)?;
            let kind = translator.encode_reply(&mut writer, &pending, &response.result)?;
            header.finish(&mut writer)?;
            kind
        };

        tracing::debug!(
            "encoded {:?} for call {} to `{}.{}`",
            kind,
            response.id,
            pending.service,
            pending.method
        );

        Ok(writer.into_bytes())
    }

    /// Decodes at most one message from the front of `buf`.
    ///
    /// Returns [`Decoded::NeedMoreInput`] when `buf` holds only part of a
    /// message; the caller should retry with the same bytes plus whatever
    /// arrives next.
    pub fn decode(&self, config: &ChannelConfig, buf: &[u8]) -> Result<Decoded, CodecError> {
        let mut state = DecodeState::AwaitingHeader;

        loop {
            state = match state {
                DecodeState::AwaitingHeader => self.decode_header(config, buf)?,
                DecodeState::AwaitingBody {
                    service,
                    correlation_id,
                    body_start,
                    frame_end,
                } => DecodeState::Complete(self.decode_body(
                    config,
                    &buf[body_start..frame_end],
                    &service,
                    correlation_id,
                    body_start,
                )?),
                DecodeState::Complete(decoded) => return Ok(decoded),
            };
        }
    }

    fn decode_header(&self, config: &ChannelConfig, buf: &[u8]) -> Result<DecodeState, CodecError> {
        if config.native {
            let service = config
                .service
                .clone()
                .ok_or(ConfigError::MissingService)?;

            return Ok(DecodeState::AwaitingBody {
                service,
                correlation_id: None,
                body_start: 0,
                frame_end: buf.len(),
            });
        }

        if buf.len() < FRAME_MIN_LENGTH {
            tracing::warn!(
                "{} byte(s) are too short for a frame; trying the fallback codec",
                buf.len()
            );
            return Ok(DecodeState::Complete(self.fallback.decode(buf)?));
        }

        let prefix = FrameHeader::read_prefix(&mut BinaryReader::new(buf))?;
        let frame_end = prefix.frame_length();
        if buf.len() < frame_end {
            return Ok(DecodeState::Complete(Decoded::NeedMoreInput));
        }

        let mut reader = BinaryReader::new(&buf[..frame_end]);
        let prefix = FrameHeader::read_prefix(&mut reader)?;
        let header = FrameHeader::read_rest(&mut reader, prefix)?;

        Ok(DecodeState::AwaitingBody {
            service: header.service,
            correlation_id: Some(header.correlation_id),
            body_start: reader.position(),
            frame_end,
        })
    }

    fn decode_body(
        &self,
        config: &ChannelConfig,
        body: &[u8],
        service: &str,
        correlation_id: Option<i64>,
        body_start: usize,
    ) -> Result<Decoded, CodecError> {
        let mut reader = BinaryReader::new(body);

        // Native messages have no length prefix, so running dry is the only
        // sign that the rest has not arrived yet
        let envelope = match reader.read_message_begin() {
            Ok(envelope) => envelope,
            Err(error) if config.native && error.is_eof() => return Ok(Decoded::NeedMoreInput),
            Err(error) => return Err(error.into()),
        };

        let naming = self.naming.get(&config.naming)?;
        let correlation_id = correlation_id.unwrap_or(i64::from(envelope.seq_id));

        tracing::debug!(
            "decoding {:?} `{}.{}` (correlation {}, seq {})",
            envelope.kind,
            service,
            envelope.name,
            correlation_id,
            envelope.seq_id
        );

        let message = match self.translate(
            naming.as_ref(),
            &mut reader,
            service,
            &envelope,
            correlation_id,
        ) {
            Ok(message) => message,
            Err(error) if config.native && error.is_eof() => return Ok(Decoded::NeedMoreInput),
            Err(error) => return Err(error.into()),
        };

        if envelope.kind == MessageKind::Call {
            let recorded = self.pending.record(
                correlation_id,
                PendingCall {
                    seq_id: envelope.seq_id,
                    service: service.to_owned(),
                    method: envelope.name.clone(),
                },
            );
            if !recorded {
                return Err(SerializationError::DuplicateCorrelation(correlation_id).into());
            }
        }

        let consumed = if config.native {
            reader.position()
        } else {
            body_start + body.len()
        };

        Ok(Decoded::Message { message, consumed })
    }

    fn translate(
        &self,
        naming: &dyn NamingStrategy,
        reader: &mut BinaryReader<'_>,
        service: &str,
        envelope: &MessageEnvelope,
        correlation_id: i64,
    ) -> Result<CodecMessage, SerializationError> {
        let translator = BodyTranslator::new(naming, &self.types);

        let message = match envelope.kind {
            MessageKind::Call | MessageKind::Oneway => CodecMessage::Request(Request::new(
                correlation_id,
                translator.decode_call(reader, service, envelope)?,
            )),
            MessageKind::Reply => CodecMessage::Response(Response::new(
                correlation_id,
                translator.decode_reply(reader, service, envelope)?,
            )),
            MessageKind::Exception => CodecMessage::Response(Response::new(
                correlation_id,
                BodyTranslator::decode_exception(reader)?,
            )),
        };

        Ok(message)
    }
}

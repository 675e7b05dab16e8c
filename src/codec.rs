mod channel_config;
mod codec_error;
mod codec_message;
mod decode_state;
mod thrift_codec;

pub use channel_config::{ChannelConfig, ConfigError};
pub use codec_error::CodecError;
pub use codec_message::{CodecMessage, Decoded};
pub use thrift_codec::ThriftCodec;

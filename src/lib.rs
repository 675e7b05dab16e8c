pub mod codec;
pub mod constants;
pub mod fallback;
pub mod frame;
pub mod locator;
pub mod naming;
pub mod pending_calls;
pub mod protocol;
pub mod rpc;
pub mod structure;
pub mod translator;
pub mod type_cache;
pub mod utils;
pub mod value;

pub use codec::{ChannelConfig, CodecError, CodecMessage, ConfigError, Decoded, ThriftCodec};

// Frame header related constants

/// Sentinel written as the first two bytes of every framed message.
pub const FRAME_MAGIC: u16 = 0xdabc;

/// Header layout version. Only version 1 is understood.
pub const FRAME_VERSION: u8 = 1;

/// Byte offset of the 4-byte total length field.
pub const FRAME_TOTAL_LENGTH_OFFSET: usize = 2;

/// Byte offset of the 2-byte header length field.
///
/// The total length counts every byte from this offset to the end of the body.
pub const FRAME_HEADER_LENGTH_OFFSET: usize = 6;

/// Byte offset of the 1-byte version field.
///
/// The header length counts every byte from this offset through the end of
/// the correlation id.
pub const FRAME_VERSION_OFFSET: usize = 8;

/// Minimum number of buffered bytes before a framed decode is attempted.
/// Shorter buffers are handed to the fallback codec.
pub const FRAME_MIN_LENGTH: usize = 10;

/// Placeholder written into the total length field until the body is known.
pub const FRAME_TOTAL_LENGTH_PLACEHOLDER: i32 = i32::MAX;

/// Placeholder written into the header length field until the header is known.
pub const FRAME_HEADER_LENGTH_PLACEHOLDER: i16 = i16::MAX;

/// Initial capacity of the scratch buffer used for outbound messages.
pub const DEFAULT_ENCODE_BUFFER_CAPACITY: usize = 1024;

// Binary protocol constants

/// Mask selecting the version bits of a strict message header.
pub const PROTOCOL_VERSION_MASK: u32 = 0xffff_0000;

/// Version bits of a strict binary protocol message header.
pub const PROTOCOL_VERSION_1: u32 = 0x8001_0000;

/// Maximum nesting depth accepted when reading structs and containers.
pub const PROTOCOL_MAX_DEPTH: usize = 64;

// Configuration keys

/// Parameter selecting native (headerless) mode.
pub const CONFIG_NATIVE_KEY: &str = "thrift.native";

/// Parameter selecting the naming strategy.
pub const CONFIG_NAMING_KEY: &str = "thrift.naming";

/// Parameter naming the service a native-mode connection serves.
pub const CONFIG_INTERFACE_KEY: &str = "interface";

/// Key of the naming strategy used when none is configured.
pub const DEFAULT_NAMING_STRATEGY: &str = "thrift";

/// Longest line the default fallback codec will buffer.
pub const DEFAULT_FALLBACK_MAX_LINE: usize = 8 * 1024;

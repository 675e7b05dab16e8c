mod body_translator;
mod decode_paths;
mod encode_paths;
mod serialization_error;

pub use body_translator::BodyTranslator;
pub use encode_paths::ReplyBody;
pub use serialization_error::SerializationError;

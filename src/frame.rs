mod frame_error;
mod frame_header;
mod frame_header_writer;

pub use frame_error::FrameDecodeError;
pub use frame_header::{FrameHeader, FramePrefix};
pub use frame_header_writer::FrameHeaderWriter;

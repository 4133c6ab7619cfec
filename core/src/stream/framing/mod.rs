//! Wire framing for compressed streams.
//!
//! Responsibilities:
//! - Define the per-block frame header
//! - Encode headers into the canonical byte layout
//! - Decode headers with strict validation
//!
//! Non-responsibilities:
//! - Compression
//! - IO
//! - Parallelism

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{
    FrameHeader,
    FrameError,
    FrameSection,
};
pub use encode::{encode_frame_header, encode_frame};
pub use decode::{parse_frame_header, decode_frame, FrameView};

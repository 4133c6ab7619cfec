//! compression/mod.rs
//! Block codecs behind a uniform, allocation-free seam.
//!
//! Notes:
//! - Every block is compressed independently, so blocks can run on any worker.
//! - Codecs write into caller-owned fixed buffers; the pipeline never grows them.
//! - The registry resolves a codec id or name into a per-worker instance.

pub mod constants;
pub mod types;
pub mod registry;
pub mod codecs;

pub use constants::*;
pub use types::*;
pub use registry::*;
pub use codecs::{Lz4BlockCodec, ZstdBlockCodec};

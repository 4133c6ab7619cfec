//! compression/codecs/mod.rs
//! Concrete block codecs.

pub mod lz4;
pub mod zstd;

pub use lz4::*;
pub use zstd::*;

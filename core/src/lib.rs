//! plz4-core
//!
//! Ordered, parallel block compression engine.
//! A fixed pool of worker threads compresses or decompresses fixed-size
//! blocks while a single dispatcher keeps the output in input order.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

// Shared and top level module
pub mod compression;
pub mod telemetry;

// Stream layers
pub mod stream;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::compression::{BlockCodec, CodecFactory, CodecOptions, CompressionCodec};
    pub use crate::stream::{
        compress_stream, decompress_stream, InputSource, OutputSink, PipelineConfig, PipelineMode,
    };
    pub use crate::telemetry::TelemetrySnapshot;
    pub use crate::types::StreamError;
}

//! stream: ordered, parallel block compression/decompression.
//!
//! This module exposes a **stable public API** for Rust callers and the CLI.
//! Internals are strictly layered:
//! framing → io → slot → block_worker → pool → pipeline → core.

pub mod framing;
pub mod io;
pub mod slot;
pub mod block_worker;
pub mod pool;
pub mod pipeline;
pub mod core;

pub use io::{
    InputSource,
    OutputSink,
};

pub use pipeline::{
    PipelineConfig,
    PipelineMode,
    run_compress_pipeline,
    run_decompress_pipeline,
};

pub use self::core::{
    compress_stream,
    decompress_stream,
};

//! src/compression/codecs/zstd.rs
//!
//! Zstd block codec.
//!
//! Design notes:
//! - Uses the bulk API so every block is a standalone zstd frame.
//! - Contexts are created once per worker and reused for every block.
//! - Errors are mapped into `CompressionError` variants with codec context.

use zstd::bulk::{Compressor, Decompressor};

use crate::compression::constants::DEFAULT_LEVEL_ZSTD;
use crate::compression::types::{BlockCodec, CompressionError};

const CODEC: &str = "zstd";

/// Zstd compressor/decompressor pair owned by one worker.
pub struct ZstdBlockCodec {
    level: i32,
    compressor: Compressor<'static>,
    decompressor: Decompressor<'static>,
}

impl ZstdBlockCodec {
    /// Create a new Zstd codec with the given level (`None` → default).
    ///
    /// # Errors
    /// - Returns `CompressionError::CodecInitFailed` if a context cannot be created.
    pub fn new(level: Option<i32>) -> Result<Self, CompressionError> {
        let level = level.unwrap_or(DEFAULT_LEVEL_ZSTD);
        let compressor = Compressor::new(level)
            .map_err(|e| CompressionError::CodecInitFailed { codec: CODEC, msg: e.to_string() })?;
        let decompressor = Decompressor::new()
            .map_err(|e| CompressionError::CodecInitFailed { codec: CODEC, msg: e.to_string() })?;

        Ok(Self { level, compressor, decompressor })
    }

    pub fn level(&self) -> i32 {
        self.level
    }
}

impl BlockCodec for ZstdBlockCodec {
    fn name(&self) -> &'static str {
        CODEC
    }

    fn compress_bound(&self, input_len: usize) -> usize {
        zstd::zstd_safe::compress_bound(input_len)
    }

    fn compress_into(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, CompressionError> {
        self.compressor
            .compress_to_buffer(input, output)
            .map_err(|e| CompressionError::CodecProcessFailed { codec: CODEC, msg: e.to_string() })
    }

    fn decompress_into(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, CompressionError> {
        self.decompressor
            .decompress_to_buffer(input, output)
            .map_err(|e| CompressionError::CodecProcessFailed { codec: CODEC, msg: e.to_string() })
    }
}

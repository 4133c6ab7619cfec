//! compression/types.rs
//! Codec ids, errors, and the block codec trait.
use std::fmt;
use std::str::FromStr;
use num_enum::TryFromPrimitive;

use crate::compression::constants::codec_ids;
use crate::utils::enum_name_or_hex;

/// Codec identifiers.
#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum CompressionCodec {
    Zstd = codec_ids::ZSTD,
    Lz4  = codec_ids::LZ4,
}

impl CompressionCodec {
    pub fn verify(raw: u16) -> Result<Self, CompressionError> {
        Self::try_from_primitive(raw).map_err(|_| CompressionError::UnsupportedCodec { codec_id: raw })
    }

    pub fn name(self) -> &'static str {
        match self {
            CompressionCodec::Zstd => "zstd",
            CompressionCodec::Lz4 => "lz4",
        }
    }
}

impl Default for CompressionCodec {
    fn default() -> Self {
        CompressionCodec::Lz4
    }
}

impl fmt::Display for CompressionCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CompressionCodec {
    type Err = CompressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lz4" => Ok(CompressionCodec::Lz4),
            "zstd" => Ok(CompressionCodec::Zstd),
            _ => Err(CompressionError::UnknownCodecName(s.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CompressionError {
    #[error("unsupported compression codec: {}", codec_label(.codec_id))]
    UnsupportedCodec { codec_id: u16 },

    #[error("unknown compression codec name: {0}")]
    UnknownCodecName(String),

    #[error("codec {codec} init failed: {msg}")]
    CodecInitFailed { codec: &'static str, msg: String },

    #[error("codec {codec} process failed: {msg}")]
    CodecProcessFailed { codec: &'static str, msg: String },

    /// The result does not fit the fixed output buffer.
    #[error("codec {codec} output exceeds capacity {capacity}")]
    OutputTooSmall { codec: &'static str, capacity: usize },
}

fn codec_label(codec_id: &u16) -> String {
    enum_name_or_hex::<CompressionCodec>(*codec_id)
}

/// One independent codec instance.
///
/// Implementations must be deterministic: the same input always produces the same output.
/// Each worker owns its own instance, so `&mut self` state (contexts, scratch) is never shared.
pub trait BlockCodec: Send {
    fn name(&self) -> &'static str;

    /// Upper bound on the compressed size of an `input_len`-byte block.
    fn compress_bound(&self, input_len: usize) -> usize;

    /// Compress `input` into `output`, returning the compressed length.
    /// Fails instead of truncating when `output` is too small.
    fn compress_into(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, CompressionError>;

    /// Decompress `input` into `output`; `output.len()` is the maximum expected size.
    /// Fails on corrupt input or when the result would overflow `output`.
    fn decompress_into(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, CompressionError>;
}

/// Builds one codec per worker.
pub trait CodecFactory: Sync {
    fn create(&self) -> Result<Box<dyn BlockCodec>, CompressionError>;
}

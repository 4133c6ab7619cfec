//! codecs/lz4.rs
//! LZ4 block codec (raw block format, no size prefix, no frame).
use lz4_flex::block::{self, CompressError, DecompressError};

use crate::compression::types::{BlockCodec, CompressionError};

const CODEC: &str = "lz4";

/// LZ4 block compressor/decompressor.
/// Stateless: each block is encoded on its own, which is what lets blocks run in parallel.
#[derive(Debug, Default, Clone, Copy)]
pub struct Lz4BlockCodec;

impl Lz4BlockCodec {
    pub fn new() -> Self {
        Self
    }
}

impl BlockCodec for Lz4BlockCodec {
    fn name(&self) -> &'static str {
        CODEC
    }

    fn compress_bound(&self, input_len: usize) -> usize {
        block::get_maximum_output_size(input_len)
    }

    fn compress_into(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, CompressionError> {
        block::compress_into(input, output).map_err(|e| match e {
            CompressError::OutputTooSmall => CompressionError::OutputTooSmall {
                codec: CODEC,
                capacity: output.len(),
            },
            #[allow(unreachable_patterns)]
            other => CompressionError::CodecProcessFailed { codec: CODEC, msg: other.to_string() },
        })
    }

    fn decompress_into(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, CompressionError> {
        block::decompress_into(input, output).map_err(|e| match e {
            DecompressError::OutputTooSmall { .. } => CompressionError::OutputTooSmall {
                codec: CODEC,
                capacity: output.len(),
            },
            other => CompressionError::CodecProcessFailed { codec: CODEC, msg: other.to_string() },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_roundtrip_into_fixed_buffers() {
        let mut codec = Lz4BlockCodec::new();
        let input = b"abcabcabcabcabcabcabcabcabcabcabcabc-tail".to_vec();
        let mut compressed = vec![0u8; codec.compress_bound(input.len())];
        let n = codec.compress_into(&input, &mut compressed).unwrap();
        assert!(n > 0 && n < input.len());

        let mut out = vec![0u8; input.len()];
        let m = codec.decompress_into(&compressed[..n], &mut out).unwrap();
        assert_eq!(&out[..m], &input[..]);
    }

    #[test]
    fn decompress_overflowing_capacity_fails() {
        let mut codec = Lz4BlockCodec::new();
        let input = vec![7u8; 1024];
        let mut compressed = vec![0u8; codec.compress_bound(input.len())];
        let n = codec.compress_into(&input, &mut compressed).unwrap();

        let mut out = vec![0u8; 512];
        assert!(codec.decompress_into(&compressed[..n], &mut out).is_err());
    }
}

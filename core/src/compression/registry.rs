//! compression/registry.rs
//! Codec registry and factory functions.

use crate::compression::codecs::{Lz4BlockCodec, ZstdBlockCodec};
use crate::compression::constants::{DEFAULT_LEVEL_LZ4, DEFAULT_LEVEL_ZSTD};
use crate::compression::types::{BlockCodec, CodecFactory, CompressionCodec, CompressionError};

pub struct CodecInfo {
    pub name: &'static str,
    pub default_level: i32,
    pub supports_level: bool,
}

pub fn resolve(codec_id: u16) -> Result<CodecInfo, CompressionError> {
    match CompressionCodec::verify(codec_id)? {
        CompressionCodec::Zstd => Ok(CodecInfo { name: "zstd", default_level: DEFAULT_LEVEL_ZSTD, supports_level: true }),
        CompressionCodec::Lz4 => Ok(CodecInfo { name: "lz4", default_level: DEFAULT_LEVEL_LZ4, supports_level: false }),
    }
}

pub fn create_codec(codec: CompressionCodec, level: Option<i32>) -> Result<Box<dyn BlockCodec>, CompressionError> {
    match codec {
        CompressionCodec::Lz4 => Ok(Box::new(Lz4BlockCodec::new())),
        CompressionCodec::Zstd => Ok(Box::new(ZstdBlockCodec::new(level)?)),
    }
}

/// Codec selection carried by the pipeline config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodecOptions {
    pub codec: CompressionCodec,
    /// Ignored by codecs without levels.
    pub level: Option<i32>,
}

impl CodecOptions {
    pub fn new(codec: CompressionCodec, level: Option<i32>) -> Self {
        Self { codec, level }
    }

    pub fn lz4() -> Self {
        Self::new(CompressionCodec::Lz4, None)
    }

    pub fn zstd(level: Option<i32>) -> Self {
        Self::new(CompressionCodec::Zstd, level)
    }
}

impl CodecFactory for CodecOptions {
    fn create(&self) -> Result<Box<dyn BlockCodec>, CompressionError> {
        create_codec(self.codec, self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_known_and_unknown_ids() {
        assert_eq!(resolve(0x0002).unwrap().name, "lz4");
        assert!(resolve(0x0001).unwrap().supports_level);
        let err = resolve(0x00ff).err().unwrap();
        assert_eq!(err.to_string(), "unsupported compression codec: 0xff");
    }

    #[test]
    fn options_build_named_codecs() {
        assert_eq!(CodecOptions::lz4().create().unwrap().name(), "lz4");
        assert_eq!(CodecOptions::zstd(Some(5)).create().unwrap().name(), "zstd");
        assert_eq!("ZSTD".parse::<CompressionCodec>().unwrap(), CompressionCodec::Zstd);
        assert!("brotli".parse::<CompressionCodec>().is_err());
    }
}

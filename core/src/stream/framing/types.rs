use std::fmt;

use crate::constants::FRAME_HEADER_LEN;

/// Canonical frame header (fixed size).
///
/// Layout, all fields little-endian:
///
/// ```text
/// [ payload_size (4) ]
/// [ checksum     (4) ]   CRC-32 of the *uncompressed* block
/// [ payload      (payload_size) ]
/// ```
///
/// Frames are concatenated with no delimiter and no trailer; the stream ends
/// where the source ends. Block order is positional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameHeader {
    pub payload_size: u32,
    pub checksum: u32,
}

impl FrameHeader {
    pub const LEN: usize = FRAME_HEADER_LEN;

    pub fn new(payload_size: u32, checksum: u32) -> Self {
        Self { payload_size, checksum }
    }

    /// Total encoded length of the frame this header introduces.
    pub fn frame_len(&self) -> usize {
        Self::LEN + self.payload_size as usize
    }
}

/// Which part of a frame ran short.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSection {
    Size,
    Checksum,
    Payload,
}

impl fmt::Display for FrameSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FrameSection::Size     => "size header",
            FrameSection::Checksum => "checksum",
            FrameSection::Payload  => "payload",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The stream ended inside a frame.
    #[error("truncated stream: {section} expected {expected} bytes, got {actual}")]
    Truncated {
        section: FrameSection,
        expected: usize,
        actual: usize,
    },

    /// Declared payload cannot come from a block of the configured chunk size.
    #[error("frame payload of {size} bytes exceeds the {max} byte limit")]
    PayloadTooLarge { size: usize, max: usize },

    /// Header and body disagree.
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

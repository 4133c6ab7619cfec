use crate::compression::CompressionError;

/// Fatal per-block failure reported by a worker. There is no retry.
#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    /// The codec rejected the block (cannot fit, corrupt input, overflow).
    #[error("slot {slot}: codec failure")]
    Codec {
        slot: usize,
        #[source]
        source: CompressionError,
    },

    /// Decompressed bytes do not match the checksum carried by the frame.
    #[error("slot {slot}: checksum mismatch (expected {expected:#010x}, got {actual:#010x})")]
    ChecksumMismatch {
        slot: usize,
        expected: u32,
        actual: u32,
    },
}

impl WorkerError {
    pub fn slot(&self) -> usize {
        match self {
            WorkerError::Codec { slot, .. } | WorkerError::ChecksumMismatch { slot, .. } => *slot,
        }
    }
}

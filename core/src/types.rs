use std::io;

use crate::{
    compression::CompressionError,
    stream::{block_worker::WorkerError, framing::FrameError},
};

/// Unified stream error covering I/O, framing, worker, codec, allocation and configuration.
/// - `From<T>` impls enable `?` across the pipeline.
/// - Every variant is fatal: the stream is single-shot and the output written so far
///   must be discarded by the caller.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// Reading the source or writing the sink failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Malformed or truncated compressed stream.
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// A worker reported a fatal block failure (codec failure or corruption).
    #[error(transparent)]
    Worker(#[from] WorkerError),

    /// Codec could not be created.
    #[error(transparent)]
    Compression(#[from] CompressionError),

    /// Slot buffers could not be reserved at startup.
    #[error("allocation of {bytes} bytes failed")]
    Allocation { bytes: usize },

    /// Invalid pipeline configuration, rejected before any worker starts.
    #[error("config error: {0}")]
    Config(String),

    /// Handoff protocol violation or a worker that vanished.
    #[error("pipeline error: {0}")]
    Pipeline(&'static str),
}

impl StreamError {
    /// True when the stream failed because a block did not match its checksum.
    pub fn is_corruption(&self) -> bool {
        matches!(self, StreamError::Worker(WorkerError::ChecksumMismatch { .. }))
    }

    /// True when the compressed stream ended inside a frame.
    pub fn is_truncation(&self) -> bool {
        matches!(self, StreamError::Frame(FrameError::Truncated { .. }))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    fn messages(err: &dyn Error) -> Vec<String> {
        let mut out = vec![err.to_string()];
        let mut cur = err.source();
        while let Some(e) = cur {
            out.push(e.to_string());
            cur = e.source();
        }
        out
    }

    #[test]
    fn wrapped_errors_print_each_message_once() {
        let err = StreamError::from(WorkerError::ChecksumMismatch { slot: 0, expected: 1, actual: 2 });
        let chain = messages(&err);
        assert_eq!(chain.len(), 1);
        assert!(chain[0].starts_with("slot 0: checksum mismatch"));

        let err = StreamError::from(WorkerError::Codec {
            slot: 3,
            source: CompressionError::OutputTooSmall { codec: "lz4", capacity: 8 },
        });
        assert_eq!(
            messages(&err),
            vec!["slot 3: codec failure".to_string(), "codec lz4 output exceeds capacity 8".to_string()]
        );

        let err = StreamError::from(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        assert_eq!(messages(&err), vec!["pipe closed".to_string()]);
    }
}

//! telemetry/counters.rs
//! Mutable counters used during a pipeline run.
//!
//! Summary: collects block, batch, and byte counts on the dispatcher thread.
//! Converted into an immutable `TelemetrySnapshot` at pipeline end.
use std::ops::AddAssign;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Deterministic counters collected during stream processing
#[derive(Default, Clone, Debug, PartialEq)]
pub struct TelemetryCounters {
    pub blocks: u64,
    pub batches: u64,
    pub bytes_read: u64,
    pub bytes_written: u64,
    /// Frame header bytes (written on compress, consumed on decompress).
    pub bytes_overhead: u64,
    /// Uncompressed bytes across all blocks.
    pub bytes_uncompressed: u64,
    /// Compressed payload bytes across all blocks (headers excluded).
    pub bytes_compressed: u64,
}

impl TelemetryCounters {
    /// Record one drained block.
    pub fn add_block(&mut self, uncompressed_len: usize, compressed_len: usize) {
        self.blocks += 1;
        self.bytes_uncompressed += uncompressed_len as u64;
        self.bytes_compressed += compressed_len as u64;
    }

    /// Record one dispatched batch.
    pub fn add_batch(&mut self) {
        self.batches += 1;
    }

    pub fn add_read(&mut self, n: usize) {
        self.bytes_read += n as u64;
    }

    pub fn add_written(&mut self, n: usize) {
        self.bytes_written += n as u64;
    }

    pub fn add_overhead(&mut self, n: usize) {
        self.bytes_overhead += n as u64;
    }
}

impl AddAssign for TelemetryCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.blocks             += rhs.blocks;
        self.batches            += rhs.batches;
        self.bytes_read         += rhs.bytes_read;
        self.bytes_written      += rhs.bytes_written;
        self.bytes_overhead     += rhs.bytes_overhead;
        self.bytes_uncompressed += rhs.bytes_uncompressed;
        self.bytes_compressed   += rhs.bytes_compressed;
    }
}

/// Blocks that have been work-signaled but whose result is not yet drained.
///
/// Owned by the dispatcher; borrow it to observe from other threads.
#[derive(Debug, Default)]
pub struct InflightGauge {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl InflightGauge {
    pub fn new() -> Self {
        Self::default()
    }

    /// A block was handed to a worker.
    pub fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::AcqRel) + 1;
        self.peak.fetch_max(now, Ordering::AcqRel);
    }

    /// A block's result was drained.
    pub fn exit(&self) {
        // Saturate rather than wrap on an unbalanced exit.
        let _ = self
            .current
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |c| Some(c.saturating_sub(1)));
    }

    pub fn current(&self) -> usize {
        self.current.load(Ordering::Acquire)
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::Acquire)
    }
}

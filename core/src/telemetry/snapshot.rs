//! telemetry/snapshot.rs
//!
//! Immutable end-of-stream view of a pipeline run.

use std::time::Duration;
use serde::{Deserialize, Serialize};

use crate::stream::PipelineMode;
use crate::telemetry::counters::TelemetryCounters;
use crate::telemetry::timers::{StageTimes, TelemetryTimer};

/// Captures counters, ratio, throughput, stage timings, and elapsed duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub mode: PipelineMode,
    pub workers: usize,
    pub chunk_size: usize,
    pub blocks: u64,
    pub batches: u64,
    pub bytes_read: u64,
    pub bytes_written: u64,
    pub bytes_overhead: u64,
    pub bytes_uncompressed: u64,
    pub bytes_compressed: u64,
    /// Highest number of blocks in flight at once; never above `workers`.
    pub peak_inflight: usize,
    pub compression_ratio: f64,
    pub throughput_bytes_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
    /// Captured output for `OutputSink::Memory`.
    #[serde(skip)]
    pub output: Option<Vec<u8>>,
}

impl TelemetrySnapshot {
    pub fn from(
        mode: PipelineMode,
        workers: usize,
        chunk_size: usize,
        counters: &TelemetryCounters,
        peak_inflight: usize,
        timer: &TelemetryTimer,
    ) -> Self {
        let elapsed = timer.elapsed();

        let compression_ratio = if counters.bytes_uncompressed > 0 {
            counters.bytes_compressed as f64 / counters.bytes_uncompressed as f64
        } else {
            0.0
        };

        let throughput = if elapsed.as_secs_f64() > 0.0 {
            counters.bytes_uncompressed as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            mode,
            workers,
            chunk_size,
            blocks: counters.blocks,
            batches: counters.batches,
            bytes_read: counters.bytes_read,
            bytes_written: counters.bytes_written,
            bytes_overhead: counters.bytes_overhead,
            bytes_uncompressed: counters.bytes_uncompressed,
            bytes_compressed: counters.bytes_compressed,
            peak_inflight,
            compression_ratio,
            throughput_bytes_per_sec: throughput,
            elapsed,
            stage_times: timer.stage_times.clone(),
            output: None,
        }
    }

    pub fn attach_output(&mut self, output: Vec<u8>) {
        self.output = Some(output);
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    /// Internal invariants:
    /// - in-flight blocks never exceeded the pool size
    /// - stage time fits inside elapsed time
    pub fn sanity_check(&self) -> bool {
        self.peak_inflight <= self.workers && self.total_stage_time() <= self.elapsed
    }
}

// ## Batching dispatcher (all stream I/O happens here)

use std::fmt;
use std::io::{Read, Write};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::compression::{CodecFactory, CodecOptions};
use crate::constants::{DEFAULT_CHUNK_SIZE, DEFAULT_WORKERS, MAX_CHUNK_SIZE, MAX_WORKERS, MIN_CHUNK_SIZE};
use crate::stream::framing::{encode_frame_header, FrameError, FrameHeader};
use crate::stream::io;
use crate::stream::pool::SlotPool;
use crate::telemetry::{InflightGauge, Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::StreamError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PipelineMode {
    Compress,
    Decompress,
}

impl fmt::Display for PipelineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineMode::Compress => f.write_str("compress"),
            PipelineMode::Decompress => f.write_str("decompress"),
        }
    }
}

/// Per-stream settings. Fixed for the whole stream; the chunk size and codec
/// must match between producer and consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    pub chunk_size: usize,
    pub workers: usize,
    pub codec: CodecOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            workers: DEFAULT_WORKERS,
            codec: CodecOptions::lz4(),
        }
    }
}

impl PipelineConfig {
    pub fn new(chunk_size: usize, workers: usize, codec: CodecOptions) -> Self {
        Self { chunk_size, workers, codec }
    }

    /// One worker per logical CPU.
    pub fn with_available_parallelism() -> Self {
        Self {
            workers: num_cpus::get().clamp(1, MAX_WORKERS),
            ..Self::default()
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_codec(mut self, codec: CodecOptions) -> Self {
        self.codec = codec;
        self
    }

    pub fn validate(&self) -> Result<(), StreamError> {
        if !(1..=MAX_WORKERS).contains(&self.workers) {
            return Err(StreamError::Config(format!(
                "workers must be between 1 and {MAX_WORKERS}, got {}",
                self.workers
            )));
        }
        if !(MIN_CHUNK_SIZE..=MAX_CHUNK_SIZE).contains(&self.chunk_size) {
            return Err(StreamError::Config(format!(
                "chunk size must be between {MIN_CHUNK_SIZE} and {MAX_CHUNK_SIZE}, got {}",
                self.chunk_size
            )));
        }
        Ok(())
    }
}

fn payload_size(len: usize) -> Result<u32, StreamError> {
    u32::try_from(len)
        .map_err(|_| StreamError::Frame(FrameError::PayloadTooLarge { size: len, max: u32::MAX as usize }))
}

// ============================================================
// Compress pipeline
// ============================================================

/// Raw bytes in, frames out.
///
/// Each batch fills up to N slots in ascending id order, signals each one as
/// soon as it is filled, then drains results in the same ascending order. That
/// drain order alone keeps frame `i` equal to block `i`.
pub fn run_compress_pipeline<R, W>(
    mut reader: R,
    mut writer: W,
    config: &PipelineConfig,
    factory: &dyn CodecFactory,
) -> Result<TelemetrySnapshot, StreamError>
where
    R: Read,
    W: Write,
{
    config.validate()?;
    let chunk_size = config.chunk_size;
    let mut counters = TelemetryCounters::default();
    let mut timer = TelemetryTimer::new();
    let gauge = InflightGauge::new();

    let mut pool = SlotPool::start(PipelineMode::Compress, config.workers, chunk_size, factory)?;
    debug!(workers = config.workers, chunk_size, "compress pipeline started");

    let mut exhausted = false;
    while !exhausted {
        // ---- Fill ----
        let mut filled = 0;
        for slot in pool.slots_mut().iter_mut() {
            let buffers = slot.buffers_mut()?;
            let n = timer.time(Stage::Read, || io::read_full(&mut reader, buffers.input_buf_mut()))?;
            buffers.input_len = n;
            counters.add_read(n);

            if n < chunk_size {
                exhausted = true;
            }
            // A zero-length tail is never dispatched: no empty trailing frame.
            if n == 0 {
                break;
            }

            slot.signal_work()?;
            gauge.enter();
            filled += 1;

            if exhausted {
                break;
            }
        }

        if filled == 0 {
            break;
        }
        counters.add_batch();
        debug!(batch = counters.batches, blocks = filled, exhausted, "compress batch dispatched");

        // ---- Drain in ascending slot order ----
        for slot in pool.slots_mut()[..filled].iter_mut() {
            let id = slot.id();
            let wait_start = Instant::now();
            let buffers = slot.wait_result()?;
            timer.stage_times.add(Stage::Wait, wait_start.elapsed());

            let header = FrameHeader::new(payload_size(buffers.output_len)?, buffers.checksum);

            let write_start = Instant::now();
            writer.write_all(&encode_frame_header(&header))?;
            writer.write_all(buffers.output())?;
            timer.stage_times.add(Stage::Write, write_start.elapsed());

            counters.add_block(buffers.input_len, buffers.output_len);
            counters.add_overhead(FrameHeader::LEN);
            counters.add_written(header.frame_len());
            trace!(slot = id, payload = header.payload_size, checksum = header.checksum, "frame written");

            slot.release()?;
            gauge.exit();
        }
    }

    writer.flush()?;
    pool.shutdown();
    timer.finish();
    debug!(blocks = counters.blocks, batches = counters.batches, "compress pipeline finished");

    Ok(TelemetrySnapshot::from(
        PipelineMode::Compress,
        config.workers,
        chunk_size,
        &counters,
        gauge.peak(),
        &timer,
    ))
}

// ============================================================
// Decompress pipeline
// ============================================================

/// Frames in, raw bytes out.
///
/// A clean end of stream is an empty read where the next size header would
/// start. Anything shorter than a full frame is a fatal truncation.
pub fn run_decompress_pipeline<R, W>(
    mut reader: R,
    mut writer: W,
    config: &PipelineConfig,
    factory: &dyn CodecFactory,
) -> Result<TelemetrySnapshot, StreamError>
where
    R: Read,
    W: Write,
{
    config.validate()?;
    let chunk_size = config.chunk_size;
    let mut counters = TelemetryCounters::default();
    let mut timer = TelemetryTimer::new();
    let gauge = InflightGauge::new();

    let mut pool = SlotPool::start(PipelineMode::Decompress, config.workers, chunk_size, factory)?;
    let max_payload = pool.compress_bound();
    debug!(workers = config.workers, chunk_size, max_payload, "decompress pipeline started");

    let mut exhausted = false;
    while !exhausted {
        // ---- Fill ----
        let mut filled = 0;
        for slot in pool.slots_mut().iter_mut() {
            let read_start = Instant::now();
            let Some(header) = io::read_frame_header(&mut reader)? else {
                exhausted = true;
                break;
            };

            let size = header.payload_size as usize;
            if size > max_payload {
                return Err(FrameError::PayloadTooLarge { size, max: max_payload }.into());
            }

            let buffers = slot.buffers_mut()?;
            io::read_payload(&mut reader, &mut buffers.input_buf_mut()[..size])?;
            buffers.input_len = size;
            buffers.checksum = header.checksum;
            timer.stage_times.add(Stage::Read, read_start.elapsed());

            counters.add_read(header.frame_len());
            counters.add_overhead(FrameHeader::LEN);

            slot.signal_work()?;
            gauge.enter();
            filled += 1;
        }

        if filled == 0 {
            break;
        }
        counters.add_batch();
        debug!(batch = counters.batches, blocks = filled, exhausted, "decompress batch dispatched");

        // ---- Drain in ascending slot order ----
        for slot in pool.slots_mut()[..filled].iter_mut() {
            let id = slot.id();
            let wait_start = Instant::now();
            let buffers = slot.wait_result()?;
            timer.stage_times.add(Stage::Wait, wait_start.elapsed());

            let write_start = Instant::now();
            writer.write_all(buffers.output())?;
            timer.stage_times.add(Stage::Write, write_start.elapsed());

            counters.add_block(buffers.output_len, buffers.input_len);
            counters.add_written(buffers.output_len);
            trace!(slot = id, len = buffers.output_len, "block written");

            slot.release()?;
            gauge.exit();
        }
    }

    writer.flush()?;
    pool.shutdown();
    timer.finish();
    debug!(blocks = counters.blocks, batches = counters.batches, "decompress pipeline finished");

    Ok(TelemetrySnapshot::from(
        PipelineMode::Decompress,
        config.workers,
        chunk_size,
        &counters,
        gauge.peak(),
        &timer,
    ))
}

// ## `core.rs`: stable public API

use std::sync::{Arc, Mutex};

use tracing::info;

use crate::{
    stream::{
        io::{open_input, open_output, InputSource, OutputSink},
        pipeline::{run_compress_pipeline, run_decompress_pipeline, PipelineConfig},
    },
    telemetry::TelemetrySnapshot,
    types::StreamError,
};

/// Compress a raw byte stream into a sequence of frames.
pub fn compress_stream(
    input: InputSource,
    output: OutputSink,
    config: PipelineConfig,
) -> Result<TelemetrySnapshot, StreamError> {
    config.validate()?;

    let reader = open_input(input)?;
    let (writer, maybe_buf) = open_output(output)?;

    let mut snapshot = run_compress_pipeline(reader, writer, &config, &config.codec)?;
    attach_captured(&mut snapshot, maybe_buf)?;

    info!(
        blocks = snapshot.blocks,
        bytes_in = snapshot.bytes_read,
        bytes_out = snapshot.bytes_written,
        codec = %config.codec.codec,
        "stream compressed"
    );
    Ok(snapshot)
}

/// Decompress a sequence of frames back into the raw byte stream.
///
/// On error nothing written so far is trustworthy; callers must discard it.
pub fn decompress_stream(
    input: InputSource,
    output: OutputSink,
    config: PipelineConfig,
) -> Result<TelemetrySnapshot, StreamError> {
    config.validate()?;

    let reader = open_input(input)?;
    let (writer, maybe_buf) = open_output(output)?;

    let mut snapshot = run_decompress_pipeline(reader, writer, &config, &config.codec)?;
    attach_captured(&mut snapshot, maybe_buf)?;

    info!(
        blocks = snapshot.blocks,
        bytes_in = snapshot.bytes_read,
        bytes_out = snapshot.bytes_written,
        codec = %config.codec.codec,
        "stream decompressed"
    );
    Ok(snapshot)
}

// --- Memory sink extraction ---
fn attach_captured(
    snapshot: &mut TelemetrySnapshot,
    maybe_buf: Option<Arc<Mutex<Vec<u8>>>>,
) -> Result<(), StreamError> {
    if let Some(arc_buf) = maybe_buf {
        let buf = arc_buf
            .lock()
            .map_err(|_| StreamError::Pipeline("capture buffer poisoned"))?;
        snapshot.attach_output(buf.clone());
    }
    Ok(())
}

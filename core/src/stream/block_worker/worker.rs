use tracing::{debug, error, trace};

use crate::{
    compression::BlockCodec,
    stream::{block_worker::types::WorkerError, slot::{BlockBuffers, WorkerEndpoint}},
    utils::{compute_checksum, verify_checksum},
};

/// Compress one block in place: `input → output`, checksum over the
/// **uncompressed input**.
pub fn process_compress_block(
    slot: usize,
    buffers: &mut BlockBuffers,
    codec: &mut dyn BlockCodec,
) -> Result<(), WorkerError> {
    let (input, output) = buffers.split_io();
    let written = codec
        .compress_into(input, output)
        .map_err(|source| WorkerError::Codec { slot, source })?;

    buffers.output_len = written;
    buffers.checksum = compute_checksum(buffers.input());
    Ok(())
}

/// Decompress one block in place and verify the checksum carried in from the
/// frame header against the **decompressed output**.
pub fn process_decompress_block(
    slot: usize,
    buffers: &mut BlockBuffers,
    codec: &mut dyn BlockCodec,
) -> Result<(), WorkerError> {
    let (input, output) = buffers.split_io();
    let written = codec
        .decompress_into(input, output)
        .map_err(|source| WorkerError::Codec { slot, source })?;

    buffers.output_len = written;
    verify_checksum(buffers.checksum, compute_checksum(buffers.output()))
        .map_err(|(expected, actual)| WorkerError::ChecksumMismatch { slot, expected, actual })
}

/// Single compression worker loop, bound to one slot until it is closed.
pub fn run_compress_worker(endpoint: WorkerEndpoint, codec: Box<dyn BlockCodec>) {
    run_worker(endpoint, codec, "compress", process_compress_block)
}

/// Single decompression worker loop, bound to one slot until it is closed.
pub fn run_decompress_worker(endpoint: WorkerEndpoint, codec: Box<dyn BlockCodec>) {
    run_worker(endpoint, codec, "decompress", process_decompress_block)
}

fn run_worker(
    endpoint: WorkerEndpoint,
    mut codec: Box<dyn BlockCodec>,
    mode: &'static str,
    process: fn(usize, &mut BlockBuffers, &mut dyn BlockCodec) -> Result<(), WorkerError>,
) {
    let slot = endpoint.id();
    debug!(slot, mode, codec = codec.name(), "worker started");

    while let Some(mut buffers) = endpoint.wait_work() {
        trace!(slot, mode, input_len = buffers.input_len, "processing block");

        match process(slot, &mut buffers, codec.as_mut()) {
            Ok(()) => {
                if !endpoint.signal_result(Ok(buffers)) {
                    debug!(slot, "dispatcher gone, worker exiting");
                    return;
                }
            }
            Err(e) => {
                error!(slot, mode, error = %e, "block failed");
                let _ = endpoint.signal_result(Err(e));
                return; // exit on error so the pipeline can terminate
            }
        }
    }

    debug!(slot, mode, "slot closed, worker exiting");
}

use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::{
    compression::{BlockCodec, CodecFactory},
    constants::WORKER_THREAD_PREFIX,
    stream::{
        block_worker::{run_compress_worker, run_decompress_worker},
        pipeline::PipelineMode,
        slot::{handoff, BlockBuffers, Slot},
    },
    types::StreamError,
};

/// Fixed pool of slots, each bound to one worker thread for the pool's lifetime.
///
/// Buffer capacities per slot:
///
/// | mode       | input            | output           |
/// | ---------- | ---------------- | ---------------- |
/// | compress   | C                | compressBound(C) |
/// | decompress | compressBound(C) | C                |
///
/// Dropping the pool closes every slot and joins every worker, so an early
/// return on a fatal error still reaps the threads.
pub struct SlotPool {
    slots: Vec<Slot>,
    workers: Vec<JoinHandle<()>>,
    compress_bound: usize,
}

impl SlotPool {
    pub fn start(
        mode: PipelineMode,
        workers: usize,
        chunk_size: usize,
        factory: &dyn CodecFactory,
    ) -> Result<Self, StreamError> {
        if workers == 0 {
            return Err(StreamError::Config("worker pool needs at least one slot".into()));
        }

        // Codecs first: a codec that cannot be built fails before any thread starts.
        let codecs = (0..workers)
            .map(|_| factory.create())
            .collect::<Result<Vec<Box<dyn BlockCodec>>, _>>()?;
        let compress_bound = codecs[0].compress_bound(chunk_size);

        let (input_capacity, output_capacity) = match mode {
            PipelineMode::Compress => (chunk_size, compress_bound),
            PipelineMode::Decompress => (compress_bound, chunk_size),
        };

        let mut endpoints = Vec::with_capacity(workers);
        let mut pool = SlotPool {
            slots: Vec::with_capacity(workers),
            workers: Vec::with_capacity(workers),
            compress_bound,
        };
        for id in 0..workers {
            let (slot, endpoint) = handoff(id, BlockBuffers::allocate(input_capacity, output_capacity)?);
            pool.slots.push(slot);
            endpoints.push(endpoint);
        }

        // ---- Workers ----
        for (endpoint, codec) in endpoints.into_iter().zip(codecs) {
            let id = endpoint.id();
            let handle = thread::Builder::new()
                .name(format!("{WORKER_THREAD_PREFIX}-{id}"))
                .spawn(move || match mode {
                    PipelineMode::Compress => run_compress_worker(endpoint, codec),
                    PipelineMode::Decompress => run_decompress_worker(endpoint, codec),
                })?;
            pool.workers.push(handle);
        }

        debug!(?mode, workers, chunk_size, compress_bound, "slot pool started");
        Ok(pool)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Worst-case compressed size of one full chunk for this pool's codec.
    pub fn compress_bound(&self) -> usize {
        self.compress_bound
    }

    /// Slots in ascending id order.
    pub fn slots_mut(&mut self) -> &mut [Slot] {
        &mut self.slots
    }

    /// Close every slot, then join every worker.
    pub fn shutdown(&mut self) {
        for slot in &mut self.slots {
            slot.close();
        }
        for handle in self.workers.drain(..) {
            let name = handle.thread().name().unwrap_or("worker").to_string();
            if handle.join().is_err() {
                warn!(worker = %name, "worker panicked before shutdown");
            }
        }
    }
}

impl Drop for SlotPool {
    fn drop(&mut self) {
        if !self.workers.is_empty() {
            debug!("slot pool dropped, shutting down workers");
        }
        self.shutdown();
    }
}

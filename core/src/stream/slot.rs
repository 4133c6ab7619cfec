//! Slots: fixed, reused block buffers plus the two handoff signals binding
//! one slot to one worker.
//!
//! Ownership of a slot's buffers moves with the signals:
//!
//! ```text
//!   dispatcher ──work-ready (Box<BlockBuffers>)──▶ worker
//!   dispatcher ◀──result-ready (Result<Box<..>>)── worker
//! ```
//!
//! Both channels have capacity 1, so there is never more than one unconsumed
//! notification per direction. A slot is only re-signaled after its result has
//! been drained, which caps in-flight blocks at the pool size.

use crossbeam::channel::{bounded, Receiver, Sender};
use tracing::trace;

use crate::stream::block_worker::WorkerError;
use crate::types::StreamError;

/// Buffers owned by one slot for the whole stream.
///
/// Vectors are sized once at allocation and never grow; `*_len` fields mark the
/// live prefix.
#[derive(Debug)]
pub struct BlockBuffers {
    input: Vec<u8>,
    pub input_len: usize,
    output: Vec<u8>,
    pub output_len: usize,
    /// CRC-32 of the uncompressed block (computed on compress, carried in on decompress).
    pub checksum: u32,
}

impl BlockBuffers {
    /// Reserve both buffers up front. Allocation failure is reported, not aborted on.
    pub fn allocate(input_capacity: usize, output_capacity: usize) -> Result<Self, StreamError> {
        Ok(Self {
            input: zeroed(input_capacity)?,
            input_len: 0,
            output: zeroed(output_capacity)?,
            output_len: 0,
            checksum: 0,
        })
    }

    pub fn input_capacity(&self) -> usize {
        self.input.len()
    }

    pub fn output_capacity(&self) -> usize {
        self.output.len()
    }

    /// Live input bytes.
    pub fn input(&self) -> &[u8] {
        &self.input[..self.input_len]
    }

    /// Live output bytes.
    pub fn output(&self) -> &[u8] {
        &self.output[..self.output_len]
    }

    /// Whole input buffer, for the dispatcher to fill.
    pub fn input_buf_mut(&mut self) -> &mut [u8] {
        &mut self.input
    }

    /// Live input next to the whole output buffer, for the worker's codec call.
    pub fn split_io(&mut self) -> (&[u8], &mut [u8]) {
        (&self.input[..self.input_len], &mut self.output)
    }
}

fn zeroed(capacity: usize) -> Result<Vec<u8>, StreamError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(capacity)
        .map_err(|_| StreamError::Allocation { bytes: capacity })?;
    buf.resize(capacity, 0);
    Ok(buf)
}

/// Dispatcher-visible slot state.
///
/// `Idle → WorkSignaled → ResultSignaled → Idle`. The worker processes the
/// block while the dispatcher sees `WorkSignaled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Idle,
    WorkSignaled,
    ResultSignaled,
}

pub type ResultSignal = Result<Box<BlockBuffers>, WorkerError>;

/// Dispatcher side of a slot.
pub struct Slot {
    id: usize,
    state: SlotState,
    buffers: Option<Box<BlockBuffers>>,
    work_tx: Option<Sender<Box<BlockBuffers>>>,
    result_rx: Receiver<ResultSignal>,
}

/// Worker side of a slot.
pub struct WorkerEndpoint {
    id: usize,
    work_rx: Receiver<Box<BlockBuffers>>,
    result_tx: Sender<ResultSignal>,
}

/// Create the two handoff signals for slot `id` and split them between the
/// dispatcher and the worker bound to it.
pub fn handoff(id: usize, buffers: BlockBuffers) -> (Slot, WorkerEndpoint) {
    let (work_tx, work_rx) = bounded(1);
    let (result_tx, result_rx) = bounded(1);

    let slot = Slot {
        id,
        state: SlotState::Idle,
        buffers: Some(Box::new(buffers)),
        work_tx: Some(work_tx),
        result_rx,
    };
    let endpoint = WorkerEndpoint { id, work_rx, result_tx };
    (slot, endpoint)
}

impl Slot {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn state(&self) -> SlotState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.work_tx.is_none()
    }

    /// Buffers of an idle slot, for the dispatcher to fill or drain.
    pub fn buffers_mut(&mut self) -> Result<&mut BlockBuffers, StreamError> {
        if self.state == SlotState::WorkSignaled {
            return Err(StreamError::Pipeline("slot buffers are owned by the worker"));
        }
        self.buffers
            .as_deref_mut()
            .ok_or(StreamError::Pipeline("slot buffers missing"))
    }

    /// Hand the buffers to the worker (`Idle → WorkSignaled`).
    pub fn signal_work(&mut self) -> Result<(), StreamError> {
        if self.state != SlotState::Idle {
            return Err(StreamError::Pipeline("work signaled on a slot that is not idle"));
        }
        let tx = self
            .work_tx
            .as_ref()
            .ok_or(StreamError::Pipeline("work signaled on a closed slot"))?;
        let buffers = self
            .buffers
            .take()
            .ok_or(StreamError::Pipeline("slot buffers missing"))?;

        tx.send(buffers)
            .map_err(|_| StreamError::Pipeline("worker exited before work was signaled"))?;
        self.state = SlotState::WorkSignaled;
        trace!(slot = self.id, "work signaled");
        Ok(())
    }

    /// Block until the worker hands the buffers back (`WorkSignaled → ResultSignaled`).
    ///
    /// A worker failure comes back as its typed error; a worker that vanished
    /// (panicked) is a pipeline error.
    pub fn wait_result(&mut self) -> Result<&BlockBuffers, StreamError> {
        if self.state != SlotState::WorkSignaled {
            return Err(StreamError::Pipeline("result awaited on a slot with no work in flight"));
        }

        match self.result_rx.recv() {
            Ok(Ok(buffers)) => {
                self.state = SlotState::ResultSignaled;
                trace!(slot = self.id, "result drained");
                Ok(&**self.buffers.insert(buffers))
            }
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Err(StreamError::Pipeline("worker exited without signaling a result")),
        }
    }

    /// Result consumed, slot may be refilled (`ResultSignaled → Idle`).
    pub fn release(&mut self) -> Result<(), StreamError> {
        if self.state != SlotState::ResultSignaled {
            return Err(StreamError::Pipeline("released a slot whose result was not drained"));
        }
        self.state = SlotState::Idle;
        Ok(())
    }

    /// Stop signal: the bound worker exits once it sees the closed channel.
    pub fn close(&mut self) {
        self.work_tx = None;
    }
}

impl WorkerEndpoint {
    pub fn id(&self) -> usize {
        self.id
    }

    /// Block until work arrives. `None` means the slot was closed.
    pub fn wait_work(&self) -> Option<Box<BlockBuffers>> {
        self.work_rx.recv().ok()
    }

    /// Hand the result back. `false` means the dispatcher is gone.
    pub fn signal_result(&self, result: ResultSignal) -> bool {
        self.result_tx.send(result).is_ok()
    }
}

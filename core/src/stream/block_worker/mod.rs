//! Block workers for the stream pipeline.
//!
//! Responsibilities:
//! - Wait for work on one bound slot
//! - Run the codec and the checksum on that slot's buffers
//! - Signal the result (or a fatal block error) back
//!
//! Non-responsibilities:
//! - IO
//! - Framing
//! - Ordering

pub mod types;
pub mod worker;

pub use types::{
    WorkerError,
};
pub use worker::{
    run_compress_worker,
    run_decompress_worker,
    process_compress_block,
    process_decompress_block,
};

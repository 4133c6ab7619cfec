/// Defaults when the caller does not configure the stream.
/// Producer and consumer must agree on the chunk size out-of-band.
pub const DEFAULT_CHUNK_SIZE: usize = 256 * 1024; // 256 KiB
pub const MIN_CHUNK_SIZE: usize = 1;
/// Max chunk size sanity bound (32 MiB). Also keeps every size inside the u32 header.
pub const MAX_CHUNK_SIZE: usize = 32 * 1024 * 1024;

/// Worker pool size used when nothing else is configured.
pub const DEFAULT_WORKERS: usize = 8;
pub const MAX_WORKERS: usize = 256;

/// Wire frame header: `[payload_size: u32][checksum: u32]`, little-endian.
pub const FRAME_HEADER_LEN: usize = 8;

/// Thread name prefix for pool workers.
pub const WORKER_THREAD_PREFIX: &str = "plz4-worker";

/// Stable codec IDs (u16) for configuration and telemetry.
/// The wire format carries no codec id; both ends agree out-of-band.
pub mod codec_ids {
    pub const ZSTD: u16 = 0x0001;
    pub const LZ4: u16  = 0x0002;
}

/// Default compression levels (balanced).
pub const DEFAULT_LEVEL_ZSTD: i32 = 3;
pub const DEFAULT_LEVEL_LZ4: i32 = 0; // block mode has no levels

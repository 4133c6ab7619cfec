use byteorder::{ByteOrder, LittleEndian};

use crate::stream::framing::types::{FrameError, FrameHeader};

/// Encode a frame header into its 8-byte wire form.
#[inline]
pub fn encode_frame_header(header: &FrameHeader) -> [u8; FrameHeader::LEN] {
    let mut out = [0u8; FrameHeader::LEN];
    LittleEndian::write_u32(&mut out[0..4], header.payload_size);
    LittleEndian::write_u32(&mut out[4..8], header.checksum);
    out
}

/// Encode a complete frame (header + payload) into a fresh buffer.
///
/// The pipeline writes header and payload separately from its slot buffers;
/// this owned form is for tools and tests that build streams by hand.
pub fn encode_frame(header: &FrameHeader, payload: &[u8]) -> Result<Vec<u8>, FrameError> {
    if payload.len() != header.payload_size as usize {
        return Err(FrameError::LengthMismatch {
            expected: header.payload_size as usize,
            actual: payload.len(),
        });
    }

    let mut out = Vec::with_capacity(header.frame_len());
    out.extend_from_slice(&encode_frame_header(header));
    out.extend_from_slice(payload);
    Ok(out)
}

use byteorder::{ByteOrder, LittleEndian};

use crate::stream::framing::types::{FrameError, FrameHeader, FrameSection};

/// Parse the fixed 8-byte header at the start of `wire`.
#[inline]
pub fn parse_frame_header(wire: &[u8]) -> Result<FrameHeader, FrameError> {
    if wire.len() < FrameHeader::LEN {
        let section = if wire.len() < 4 { FrameSection::Size } else { FrameSection::Checksum };
        return Err(FrameError::Truncated {
            section,
            expected: FrameHeader::LEN,
            actual: wire.len(),
        });
    }

    Ok(FrameHeader {
        payload_size: LittleEndian::read_u32(&wire[0..4]),
        checksum: LittleEndian::read_u32(&wire[4..8]),
    })
}

/// Borrowed view of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameView<'a> {
    pub header: FrameHeader,
    pub payload: &'a [u8],
}

/// Decode the first frame of `wire` and return it with the remaining bytes.
///
/// Zero-copy; used to walk an in-memory compressed stream.
pub fn decode_frame(wire: &[u8]) -> Result<(FrameView<'_>, &[u8]), FrameError> {
    let header = parse_frame_header(wire)?;
    let end = header.frame_len();
    if wire.len() < end {
        return Err(FrameError::Truncated {
            section: FrameSection::Payload,
            expected: header.payload_size as usize,
            actual: wire.len() - FrameHeader::LEN,
        });
    }

    let view = FrameView { header, payload: &wire[FrameHeader::LEN..end] };
    Ok((view, &wire[end..]))
}

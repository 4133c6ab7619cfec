// ## Normalized I/O + exact-length block reads

use std::io::{self, Cursor, ErrorKind, Read, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::stream::framing::{parse_frame_header, FrameError, FrameHeader, FrameSection};
use crate::types::StreamError;

/// Canonical input abstraction
pub enum InputSource {
    Reader(Box<dyn Read + Send>),
    File(PathBuf),
    Memory(Vec<u8>),
}

/// Canonical output abstraction
pub enum OutputSink {
    Writer(Box<dyn Write + Send>),
    File(PathBuf),
    /// Capture the output; it is attached to the returned telemetry snapshot.
    Memory,
}

/// Normalize input source into a boxed reader
pub fn open_input(src: InputSource) -> Result<Box<dyn Read + Send>, StreamError> {
    let reader: Box<dyn Read + Send> = match src {
        InputSource::Reader(r) => r,
        InputSource::File(p) => Box::new(std::fs::File::open(p)?),
        InputSource::Memory(b) => Box::new(Cursor::new(b)),
    };
    Ok(reader)
}

/// Normalize output sink into a boxed writer.
/// For `OutputSink::Memory` the shared capture buffer is returned alongside.
pub fn open_output(
    sink: OutputSink,
) -> Result<(Box<dyn Write + Send>, Option<Arc<Mutex<Vec<u8>>>>), StreamError> {
    match sink {
        OutputSink::Writer(w) => Ok((w, None)),
        OutputSink::File(p) => Ok((Box::new(io::BufWriter::new(std::fs::File::create(p)?)), None)),
        OutputSink::Memory => {
            let buf = Arc::new(Mutex::new(Vec::new()));
            let writer = SharedBufferWriter { buf: buf.clone() };
            Ok((Box::new(writer), Some(buf)))
        }
    }
}

pub struct SharedBufferWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl SharedBufferWriter {
    pub fn new(buf: Arc<Mutex<Vec<u8>>>) -> Self {
        Self { buf }
    }
}

impl Write for SharedBufferWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .buf
            .lock()
            .map_err(|_| io::Error::new(ErrorKind::Other, "capture buffer poisoned"))?;
        guard.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ================= Block reads =================

/// Fill `buf` from `r`, retrying on `Interrupted` and accumulating short reads.
///
/// Returns the number of bytes obtained; anything below `buf.len()` means the
/// source is exhausted.
pub fn read_full<R: Read + ?Sized>(r: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut off = 0;

    while off < buf.len() {
        match r.read(&mut buf[off..]) {
            Ok(0) => break,
            Ok(n) => off += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(off)
}

/// Read the next frame header.
///
/// - `Ok(None)`: zero bytes available, clean end of stream.
/// - `Err(Truncated)`: the stream ended inside the 8-byte header.
pub fn read_frame_header<R: Read + ?Sized>(r: &mut R) -> Result<Option<FrameHeader>, StreamError> {
    let mut hdr_buf = [0u8; FrameHeader::LEN];
    let n = read_full(r, &mut hdr_buf)?;
    if n == 0 {
        return Ok(None);
    }

    Ok(Some(parse_frame_header(&hdr_buf[..n])?))
}

/// Read exactly `buf.len()` payload bytes; a short source is a truncated frame.
pub fn read_payload<R: Read + ?Sized>(r: &mut R, buf: &mut [u8]) -> Result<(), StreamError> {
    let n = read_full(r, buf)?;
    if n < buf.len() {
        return Err(FrameError::Truncated {
            section: FrameSection::Payload,
            expected: buf.len(),
            actual: n,
        }
        .into());
    }
    Ok(())
}

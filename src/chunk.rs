//! PNG chunk framing: length, type tag, payload, CRC-32.
//!
//! Payloads are written straight into the [`OutputBuffer`]; the length field is reserved up
//! front and back-patched once the payload is complete, so a chunk is never assembled in a
//! separate buffer.

use crate::buffer::OutputBuffer;
use crate::error::{Error, Result};

/// Largest payload length the PNG format allows.
pub const MAX_CHUNK_LEN: usize = (1 << 31) - 1;

/// Bytes a chunk adds around its payload: length, type and CRC.
pub const CHUNK_OVERHEAD: usize = 12;

/// An open chunk whose payload is still being written.
#[derive(Debug)]
#[must_use = "an open chunk must be closed"]
pub struct ChunkFrame {
    start: usize,
    tag: [u8; 4],
}

impl ChunkFrame {
    /// Reserves the length field and writes the type tag.
    pub fn open(out: &mut OutputBuffer, tag: &[u8; 4]) -> Result<Self> {
        let start = out.len();
        out.write_u32(0)?;
        out.write(tag)?;
        Ok(ChunkFrame { start, tag: *tag })
    }

    /// Payload bytes written since [`open`](Self::open).
    pub fn payload_len(&self, out: &OutputBuffer) -> usize {
        out.len() - self.start - 8
    }

    /// Back-patches the length and appends the CRC over type tag and payload.
    pub fn close(self, out: &mut OutputBuffer) -> Result<()> {
        let len = self.payload_len(out);
        if len > MAX_CHUNK_LEN {
            return Err(Error::ChunkTooLong(len));
        }
        out.patch_u32(self.start, len as u32)?;
        let crc = crc32fast::hash(&out.as_slice()[self.start + 4..]);
        out.write_u32(crc)?;
        log::trace!(
            "closed {} chunk: {} payload bytes, crc {:08x}",
            String::from_utf8_lossy(&self.tag),
            len,
            crc
        );
        Ok(())
    }
}

/// Writes a complete chunk whose payload is produced by `payload`.
///
/// `payload` appends directly to `out`; everything it writes becomes the chunk data.
pub fn write_chunk<F>(out: &mut OutputBuffer, tag: &[u8; 4], payload: F) -> Result<()>
where
    F: FnOnce(&mut OutputBuffer) -> Result<()>,
{
    let frame = ChunkFrame::open(out, tag)?;
    payload(out)?;
    frame.close(out)
}

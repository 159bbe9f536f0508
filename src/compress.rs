//! Streaming zlib compression straight into an [`OutputBuffer`].
//!
//! A [`CompressionSession`] is fed scanlines one at a time and writes compressed bytes into
//! the unused tail of the buffer. It is single-use: [`finish`](CompressionSession::finish)
//! consumes it.

use crate::buffer::OutputBuffer;
use crate::error::{Error, Result};
use flate2::{Compress, Compression, FlushCompress, Status};

/// Deflate window of 2^11 bytes.
pub const WINDOW_BITS: u8 = 11;

/// Worst-case zlib stream length for `input_len` bytes of input.
///
/// Covers stored-block fallback on incompressible data: 5 bytes of block header per block,
/// plus the 2-byte zlib header and 4-byte Adler-32 trailer.
pub fn max_compressed_len(input_len: usize) -> usize {
    input_len + input_len / 256 + 64
}

pub struct CompressionSession {
    inner: Compress,
}

impl CompressionSession {
    /// Starts a zlib-wrapped deflate stream at the default compression level with a
    /// [`WINDOW_BITS`] window.
    pub fn new() -> Self {
        CompressionSession {
            inner: Compress::new_with_window_bits(Compression::default(), true, WINDOW_BITS),
        }
    }

    /// Feeds `input`, telling the compressor more input may follow.
    pub fn feed(&mut self, mut input: &[u8], out: &mut OutputBuffer) -> Result<()> {
        while !input.is_empty() {
            let (consumed, produced, status) = self.step(input, out, FlushCompress::None)?;
            input = &input[consumed..];
            if status == Status::StreamEnd {
                return Err(Error::Compression("stream ended before all input was fed".into()));
            }
            if consumed == 0 && produced == 0 {
                return Err(stalled(out));
            }
        }
        Ok(())
    }

    /// Signals end of stream. The compressor must report completion on this call.
    pub fn finish(mut self, out: &mut OutputBuffer) -> Result<()> {
        let (_, _, status) = self.step(&[], out, FlushCompress::Finish)?;
        if status != Status::StreamEnd {
            return Err(stalled(out));
        }
        log::debug!(
            "compressed {} bytes into {}",
            self.inner.total_in(),
            self.inner.total_out()
        );
        Ok(())
    }

    fn step(
        &mut self,
        input: &[u8],
        out: &mut OutputBuffer,
        flush: FlushCompress,
    ) -> Result<(usize, usize, Status)> {
        let before_in = self.inner.total_in();
        let before_out = self.inner.total_out();
        let status = self
            .inner
            .compress(input, out.spare_mut(), flush)
            .map_err(|e| Error::Compression(e.to_string()))?;
        let consumed = (self.inner.total_in() - before_in) as usize;
        let produced = (self.inner.total_out() - before_out) as usize;
        out.advance(produced)?;
        Ok((consumed, produced, status))
    }
}

impl Default for CompressionSession {
    fn default() -> Self {
        Self::new()
    }
}

fn stalled(out: &OutputBuffer) -> Error {
    if out.remaining() == 0 {
        Error::OutputOverflow {
            requested: 1,
            remaining: 0,
        }
    } else {
        Error::Compression("compressor made no progress".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn inflate(bytes: &[u8]) -> Vec<u8> {
        let mut decoded = Vec::new();
        flate2::read::ZlibDecoder::new(bytes)
            .read_to_end(&mut decoded)
            .unwrap();
        decoded
    }

    #[test]
    fn test_feed_in_pieces_then_finish() {
        let mut out = OutputBuffer::with_capacity(max_compressed_len(3000));
        let mut session = CompressionSession::new();
        let mut expected = Vec::new();
        for i in 0..100u8 {
            let line = [i; 30];
            session.feed(&line, &mut out).unwrap();
            expected.extend_from_slice(&line);
        }
        session.finish(&mut out).unwrap();
        assert_eq!(inflate(out.as_slice()), expected);
    }

    #[test]
    fn test_zlib_header_declares_small_window() {
        let mut out = OutputBuffer::with_capacity(max_compressed_len(64));
        let mut session = CompressionSession::new();
        session.feed(&[0xffu8; 64], &mut out).unwrap();
        session.finish(&mut out).unwrap();
        // CMF: CINFO = WINDOW_BITS - 8, CM = 8 (deflate)
        assert_eq!(out.as_slice()[0], 0x38);
        assert_eq!(u16::from_be_bytes([out.as_slice()[0], out.as_slice()[1]]) % 31, 0);
    }

    #[test]
    fn test_empty_stream() {
        let mut out = OutputBuffer::with_capacity(max_compressed_len(0));
        CompressionSession::new().finish(&mut out).unwrap();
        assert!(inflate(out.as_slice()).is_empty());
    }

    #[test]
    fn test_incompressible_input_fits_bound() {
        // xorshift noise defeats the LZ matcher
        let mut state = 0x2545_f491u32;
        let input: Vec<u8> = (0..50_000)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                state as u8
            })
            .collect();
        let mut out = OutputBuffer::with_capacity(max_compressed_len(input.len()));
        let mut session = CompressionSession::new();
        for piece in input.chunks(97) {
            session.feed(piece, &mut out).unwrap();
        }
        session.finish(&mut out).unwrap();
        assert_eq!(inflate(out.as_slice()), input);
    }

    #[test]
    fn test_tiny_buffer_overflows_loudly() {
        let mut out = OutputBuffer::with_capacity(4);
        let mut session = CompressionSession::new();
        let result = session
            .feed(&[7u8; 10_000], &mut out)
            .and_then(|_| session.finish(&mut out));
        assert!(result.is_err());
        assert!(out.len() <= 4);
    }
}

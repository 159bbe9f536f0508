//! 1-bit grayscale PNG encoding of a [`ModuleGrid`].
//!
//! The document is signature, `IHDR`, a single `IDAT` holding the zlib stream of every
//! scanline, and `IEND`. Everything is written into one [`OutputBuffer`] sized up front by
//! [`max_encoded_len`], so encoding never reallocates.

use crate::buffer::OutputBuffer;
use crate::chunk::{write_chunk, ChunkFrame, CHUNK_OVERHEAD};
use crate::compress::{max_compressed_len, CompressionSession};
use crate::error::{Error, Result};
use crate::params::RasterParams;
use crate::qrcode::ModuleGrid;
use crate::scanline::Scanline;
use std::io::Write;

/// The 8-byte PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

const IHDR_LEN: usize = 13;
const BIT_DEPTH: u8 = 1;
const COLOR_TYPE_GRAYSCALE: u8 = 0;

/// Where a [`PngEncoder`] is in the document.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EncoderState {
    Start,
    HeaderWritten,
    CompressingRows,
    Finalizing,
    Done,
    Failed,
}

/// Upper bound on the encoded size of a PNG `image_size` pixels square.
pub fn max_encoded_len(image_size: u32) -> usize {
    let raw = Scanline::byte_len(image_size) * image_size as usize;
    PNG_SIGNATURE.len()
        + (CHUNK_OVERHEAD + IHDR_LEN)
        + (CHUNK_OVERHEAD + max_compressed_len(raw))
        + CHUNK_OVERHEAD
}

/// Streams one grid into a PNG document.
///
/// An encoder is single-use: once it reaches [`EncoderState::Done`] or
/// [`EncoderState::Failed`] it refuses further work.
#[derive(Debug)]
pub struct PngEncoder<'a> {
    grid: &'a ModuleGrid,
    params: RasterParams,
    image_size: u32,
    state: EncoderState,
}

impl<'a> PngEncoder<'a> {
    /// Validates that the image fits within [`MAX_IMAGE_SIZE`](crate::params::MAX_IMAGE_SIZE).
    pub fn new(grid: &'a ModuleGrid, params: RasterParams) -> Result<Self> {
        let image_size = params.image_size(grid.size())?;
        Ok(PngEncoder {
            grid,
            params,
            image_size,
            state: EncoderState::Start,
        })
    }

    pub fn state(&self) -> EncoderState {
        self.state
    }

    /// Width and height of the image in pixels.
    pub fn image_size(&self) -> u32 {
        self.image_size
    }

    /// Writes the complete document into `out`.
    ///
    /// On error the encoder is left in [`EncoderState::Failed`]; bytes already in `out` are a
    /// truncated, unusable document.
    pub fn encode(&mut self, out: &mut OutputBuffer) -> Result<()> {
        if self.state != EncoderState::Start {
            return Err(Error::InvalidParameters(format!(
                "encoder already used (state {:?})",
                self.state
            )));
        }
        let result = self.run(out);
        if let Err(e) = &result {
            log::debug!("png encoding failed in state {:?}: {}", self.state, e);
            self.state = EncoderState::Failed;
        }
        result
    }

    fn run(&mut self, out: &mut OutputBuffer) -> Result<()> {
        self.write_header(out)?;
        self.transition(EncoderState::HeaderWritten);

        let idat = ChunkFrame::open(out, b"IDAT")?;
        let mut session = CompressionSession::new();
        self.transition(EncoderState::CompressingRows);
        self.write_rows(&mut session, out)?;

        self.transition(EncoderState::Finalizing);
        session.finish(out)?;
        idat.close(out)?;
        write_chunk(out, b"IEND", |_| Ok(()))?;

        self.transition(EncoderState::Done);
        Ok(())
    }

    fn write_header(&self, out: &mut OutputBuffer) -> Result<()> {
        out.write(&PNG_SIGNATURE)?;
        write_chunk(out, b"IHDR", |out| {
            out.write_u32(self.image_size)?;
            out.write_u32(self.image_size)?;
            out.write(&[
                BIT_DEPTH,
                COLOR_TYPE_GRAYSCALE,
                0, // compression: deflate
                0, // filter method
                0, // no interlace
            ])
        })
    }

    fn write_rows(&self, session: &mut CompressionSession, out: &mut OutputBuffer) -> Result<()> {
        let scale = self.params.scale();
        let quiet_rows = scale * self.params.padding();
        let mut line = Scanline::new(self.image_size);

        for _ in 0..quiet_rows {
            session.feed(line.as_bytes(), out)?;
        }
        for y in 0..self.grid.size() {
            line.pack_row(self.grid, y, &self.params);
            for _ in 0..scale {
                session.feed(line.as_bytes(), out)?;
            }
        }
        line.clear();
        for _ in 0..quiet_rows {
            session.feed(line.as_bytes(), out)?;
        }
        Ok(())
    }

    fn transition(&mut self, next: EncoderState) {
        log::trace!("png encoder {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

/// Encodes `grid` as a PNG document in a freshly allocated, exactly bounded buffer.
pub fn encode_png(grid: &ModuleGrid, params: &RasterParams) -> Result<Vec<u8>> {
    let mut encoder = PngEncoder::new(grid, *params)?;
    let mut out = OutputBuffer::with_capacity(max_encoded_len(encoder.image_size()));
    encoder.encode(&mut out)?;
    log::debug!(
        "encoded {}x{} png in {} of {} bytes",
        encoder.image_size(),
        encoder.image_size(),
        out.len(),
        out.capacity()
    );
    Ok(out.into_vec())
}

/// Encodes `grid` as PNG and writes the finished document to `writer`.
pub fn write_png<W: Write>(grid: &ModuleGrid, params: &RasterParams, mut writer: W) -> Result<()> {
    let bytes = encode_png(grid, params)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

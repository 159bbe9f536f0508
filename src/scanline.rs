//! Packing of grid rows into 1-bit-per-pixel PNG scanlines.
//!
//! Bits are MSB-first within each byte; a set bit is light and a cleared bit is dark.
//! Every line starts with the filter-type byte, always [`FILTER_NONE`].

use crate::params::RasterParams;
use crate::qrcode::ModuleGrid;

/// PNG filter type 0: the scanline bytes are stored unmodified.
pub const FILTER_NONE: u8 = 0;

/// One reusable scanline: filter byte followed by `ceil(image_size / 8)` packed bytes.
#[derive(Clone, Debug)]
pub struct Scanline {
    bytes: Vec<u8>,
}

impl Scanline {
    /// Allocates a light scanline for an image `image_size` pixels wide.
    pub fn new(image_size: u32) -> Self {
        let mut line = Scanline {
            bytes: vec![0u8; Self::byte_len(image_size)],
        };
        line.clear();
        line
    }

    /// Length in bytes, including the filter byte, of a line `image_size` pixels wide.
    pub fn byte_len(image_size: u32) -> usize {
        1 + (image_size as usize + 7) / 8
    }

    /// Resets the line to all light pixels. Quiet-zone rows are exactly this.
    pub fn clear(&mut self) {
        self.bytes[0] = FILTER_NONE;
        self.bytes[1..].fill(0xff);
    }

    /// Packs row `y` of `grid`, scaled horizontally by `params.scale()` and shifted right
    /// by the quiet zone.
    pub fn pack_row(&mut self, grid: &ModuleGrid, y: u32, params: &RasterParams) {
        self.clear();

        // Module boundaries are not byte-aligned in general, so walk one pixel at a time.
        let start = params.scale() as usize * params.padding() as usize;
        let mut byte = 1 + start / 8;
        let mut mask = 0x80u8 >> (start % 8);
        for &dark in grid.row(y) {
            for _ in 0..params.scale() {
                if dark {
                    self.bytes[byte] &= !mask;
                }
                mask >>= 1;
                if mask == 0 {
                    mask = 0x80;
                    byte += 1;
                }
            }
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

//! Scale and quiet-zone parameters shared by both encoders.

use crate::error::{Error, Result};

/// Default pixel (or SVG unit) edge length of one module.
pub const DEFAULT_SCALE: u32 = 5;

/// Default quiet zone width, in modules, on each side of the symbol.
pub const DEFAULT_PADDING: u32 = 4;

/// Largest image edge, in pixels, either encoder will produce.
///
/// Version 40 at the default scale and padding is 925 pixels, so this leaves room for
/// scales up to 8 on the largest symbol while keeping the PNG buffer under ~9 MB.
pub const MAX_IMAGE_SIZE: u32 = 8192;

/// How grid modules map onto output pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RasterParams {
    scale: u32,
    padding: u32,
}

impl RasterParams {
    /// Creates parameters, rejecting a zero scale.
    pub fn new(scale: u32, padding: u32) -> Result<Self> {
        if scale == 0 {
            return Err(Error::InvalidParameters("scale must be positive".into()));
        }
        Ok(RasterParams { scale, padding })
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn padding(&self) -> u32 {
        self.padding
    }

    /// Edge length in pixels of the rendered image: `scale * (grid_size + 2 * padding)`.
    ///
    /// Fails when the result is zero or larger than [`MAX_IMAGE_SIZE`].
    pub fn image_size(&self, grid_size: u32) -> Result<u32> {
        let modules = u64::from(grid_size) + 2 * u64::from(self.padding);
        let size = u64::from(self.scale).saturating_mul(modules);
        if size == 0 {
            return Err(Error::InvalidParameters("image would be empty".into()));
        }
        if size > u64::from(MAX_IMAGE_SIZE) {
            return Err(Error::ImageTooLarge {
                size,
                max: MAX_IMAGE_SIZE,
            });
        }
        Ok(size as u32)
    }
}

impl Default for RasterParams {
    fn default() -> Self {
        RasterParams {
            scale: DEFAULT_SCALE,
            padding: DEFAULT_PADDING,
        }
    }
}

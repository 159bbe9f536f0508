#![forbid(unsafe_code)]
//! QR code module grids and the capability that produces them.
//!
//! The encoders in this crate never build QR symbols themselves. They consume a [`ModuleGrid`],
//! a square matrix of dark and light modules, obtained from any [`GridProvider`]. The default
//! provider, [`QrCodeProvider`], is backed by the `qrcode` crate.

use crate::error::{Error, Result};

/// A square grid of dark (`true`) and light (`false`) modules.
///
/// Instances are immutable after creation.
///
/// # Example
///
/// ```rust
/// use qiraster::qrcode::ModuleGrid;
///
/// let grid = ModuleGrid::from_fn(3, |x, y| x == y);
/// assert_eq!(grid.size(), 3);
/// assert!(grid.module(1, 1));
/// assert!(!grid.module(0, 1));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleGrid {
    /// Width and height in modules. Between 21 and 177 for real QR symbols.
    size: u32,

    /// Row-major module colors, `size * size` entries.
    modules: Vec<bool>,
}

impl ModuleGrid {
    /// Wraps row-major module data, checking that it describes a non-empty square.
    pub fn new(size: u32, modules: Vec<bool>) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidGrid("grid size must be at least 1".into()));
        }
        let expected = (size as usize) * (size as usize);
        if modules.len() != expected {
            return Err(Error::InvalidGrid(format!(
                "expected {} modules for size {}, got {}",
                expected,
                size,
                modules.len()
            )));
        }
        Ok(ModuleGrid { size, modules })
    }

    /// Builds a grid by asking `f(x, y)` for the color of every module.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn from_fn<F>(size: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> bool,
    {
        assert!(size > 0, "Grid size must be positive");
        let mut modules = Vec::with_capacity((size as usize) * (size as usize));
        for y in 0..size {
            for x in 0..size {
                modules.push(f(x, y));
            }
        }
        ModuleGrid { size, modules }
    }

    /// Side length in modules.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Returns whether the module at column `x`, row `y` is dark.
    ///
    /// Coordinates outside the grid read as light, so callers iterating a padded area can
    /// ask about the quiet zone directly.
    pub fn module(&self, x: u32, y: u32) -> bool {
        if x >= self.size || y >= self.size {
            return false;
        }
        self.modules[(y as usize) * (self.size as usize) + (x as usize)]
    }

    /// The modules of row `y`, left to right.
    pub fn row(&self, y: u32) -> &[bool] {
        let start = (y as usize) * (self.size as usize);
        &self.modules[start..start + self.size as usize]
    }
}

/// The error correction level in a QR Code symbol.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, clap::ValueEnum)]
pub enum QrCodeEcc {
    /// Tolerates ~7% erroneous codewords.
    #[default]
    Low,
    /// Tolerates ~15% erroneous codewords.
    Medium,
    /// Tolerates ~25% erroneous codewords.
    Quartile,
    /// Tolerates ~30% erroneous codewords.
    High,
}

impl From<QrCodeEcc> for ::qrcode::EcLevel {
    fn from(ecc: QrCodeEcc) -> Self {
        match ecc {
            QrCodeEcc::Low => ::qrcode::EcLevel::L,
            QrCodeEcc::Medium => ::qrcode::EcLevel::M,
            QrCodeEcc::Quartile => ::qrcode::EcLevel::Q,
            QrCodeEcc::High => ::qrcode::EcLevel::H,
        }
    }
}

/// A QR Code Model 2 version number, 1 to 40.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Version(u8);

impl Version {
    /// The minimum version number supported in the QR Code Model 2 standard.
    pub const MIN: Version = Version(1);

    /// The maximum version number supported in the QR Code Model 2 standard.
    pub const MAX: Version = Version(40);

    /// Creates a version from the given number, rejecting anything outside [1, 40].
    pub fn new(ver: u8) -> Result<Self> {
        if ver < Version::MIN.0 || ver > Version::MAX.0 {
            return Err(Error::InvalidParameters(format!("bad version '{}'", ver)));
        }
        Ok(Version(ver))
    }

    /// Returns the value, which is in the range [1, 40].
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Anything able to turn text into a [`ModuleGrid`].
///
/// `version` of `None` lets the provider pick the smallest version that fits.
pub trait GridProvider {
    fn generate(&self, text: &str, version: Option<Version>, ecc: QrCodeEcc) -> Result<ModuleGrid>;
}

/// Grid provider backed by the `qrcode` crate.
#[derive(Copy, Clone, Debug, Default)]
pub struct QrCodeProvider;

impl GridProvider for QrCodeProvider {
    fn generate(&self, text: &str, version: Option<Version>, ecc: QrCodeEcc) -> Result<ModuleGrid> {
        let level = ::qrcode::EcLevel::from(ecc);
        let code = match version {
            Some(v) => ::qrcode::QrCode::with_version(
                text.as_bytes(),
                ::qrcode::Version::Normal(i16::from(v.value())),
                level,
            ),
            None => ::qrcode::QrCode::with_error_correction_level(text.as_bytes(), level),
        }
        .map_err(|e| Error::Generation(e.to_string()))?;

        let size = u32::try_from(code.width())
            .map_err(|_| Error::Generation(format!("grid width {} out of range", code.width())))?;
        let modules = code
            .to_colors()
            .into_iter()
            .map(|color| color == ::qrcode::Color::Dark)
            .collect();
        log::debug!("generated {}x{} module grid ({:?})", size, size, ecc);
        ModuleGrid::new(size, modules)
    }
}

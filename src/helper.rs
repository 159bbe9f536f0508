use crate::error::Result;
use crate::params::RasterParams;
use crate::png::write_png;
use crate::qrcode::{GridProvider, ModuleGrid, QrCodeEcc, QrCodeProvider, Version};
use crate::svg::{to_svg_string, write_svg};

use image::{ImageBuffer, Luma};
use std::io::Write;

/// Output document format.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Svg,
    Png,
}

/// Everything needed to turn text into one finished document.
#[derive(Clone, Debug)]
pub struct RenderRequest<'a> {
    pub text: &'a str,
    pub ecc: QrCodeEcc,
    /// `None` picks the smallest version that fits.
    pub version: Option<Version>,
    pub format: OutputFormat,
    pub params: RasterParams,
}

impl<'a> RenderRequest<'a> {
    /// A request with the default level, automatic version, SVG output and default raster
    /// parameters.
    pub fn new(text: &'a str) -> Self {
        RenderRequest {
            text,
            ecc: QrCodeEcc::default(),
            version: None,
            format: OutputFormat::default(),
            params: RasterParams::default(),
        }
    }
}

/// Generates the grid for `request` with `provider` and writes the document to `writer`.
///
/// Parameters are validated against the generated grid before anything is written, so
/// generation failures and oversized images produce no output at all.
///
/// # Example
///
/// ```
/// use qiraster::helper::{render, OutputFormat, RenderRequest};
/// use qiraster::qrcode::QrCodeProvider;
///
/// let mut request = RenderRequest::new("Hello, World!");
/// request.format = OutputFormat::Png;
/// let mut png = Vec::new();
/// render(&QrCodeProvider, &request, &mut png).unwrap();
/// assert_eq!(&png[1..4], b"PNG");
/// ```
pub fn render<P, W>(provider: &P, request: &RenderRequest<'_>, writer: W) -> Result<()>
where
    P: GridProvider + ?Sized,
    W: Write,
{
    let grid = provider.generate(request.text, request.version, request.ecc)?;
    let image_size = request.params.image_size(grid.size())?;
    log::debug!(
        "rendering {}x{} module grid as {:?}, {} px square",
        grid.size(),
        grid.size(),
        request.format,
        image_size
    );
    match request.format {
        OutputFormat::Svg => write_svg(&grid, &request.params, writer),
        OutputFormat::Png => write_png(&grid, &request.params, writer),
    }
}

/// Generates a QR Code SVG from the provided content.
///
/// Uses the low error correction level, automatic version, scale 5 and padding 4.
///
/// # Example
///
/// ```
/// use qiraster::helper::generate_svg_string;
///
/// let svg_string = generate_svg_string("Hello, World!").unwrap();
/// assert!(svg_string.starts_with("<svg width=\"145\""));
/// ```
pub fn generate_svg_string(content: &str) -> Result<String> {
    let grid = QrCodeProvider.generate(content, None, QrCodeEcc::Low)?;
    to_svg_string(&grid, &RasterParams::default())
}

/// Generates a QR Code PNG from the provided content, with the same defaults as
/// [`generate_svg_string`].
pub fn generate_png(content: &str) -> Result<Vec<u8>> {
    let grid = QrCodeProvider.generate(content, None, QrCodeEcc::Low)?;
    crate::png::encode_png(&grid, &RasterParams::default())
}

/// Renders a grid into an in-memory grayscale image, scaled and padded like the PNG encoder.
///
/// # Example
///
/// ```
/// use qiraster::helper::to_image_buffer;
/// use qiraster::params::RasterParams;
/// use qiraster::qrcode::ModuleGrid;
///
/// let grid = ModuleGrid::from_fn(21, |x, y| x == y);
/// let img = to_image_buffer(&grid, &RasterParams::new(1, 4).unwrap()).unwrap();
/// assert_eq!(img.dimensions(), (29, 29));
/// ```
pub fn to_image_buffer(
    grid: &ModuleGrid,
    params: &RasterParams,
) -> Result<ImageBuffer<Luma<u8>, Vec<u8>>> {
    let size = params.image_size(grid.size())?;
    let border = params.padding();
    let scale = params.scale();
    let mut img = ImageBuffer::new(size, size);

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let qr_x = (x / scale).checked_sub(border);
        let qr_y = (y / scale).checked_sub(border);
        let dark = match (qr_x, qr_y) {
            (Some(qr_x), Some(qr_y)) => grid.module(qr_x, qr_y),
            _ => false,
        };
        *pixel = if dark {
            Luma([0u8]) // Black
        } else {
            Luma([255u8]) // White
        };
    }

    Ok(img)
}

//! # qiraster
//!
//! A Rust library for rendering QR code module grids as SVG documents or PNG images.
//!
//! `qiraster` takes a square grid of dark and light modules, produced by any [`GridProvider`]
//! (the bundled [`QrCodeProvider`] wraps the `qrcode` crate), and writes it out at a chosen
//! scale with a quiet zone of light modules around it.
//!
//! ## Features
//!
//! - SVG output with horizontally adjacent dark modules merged into single rectangles.
//! - 1-bit grayscale PNG output, written chunk by chunk into one preallocated buffer with
//!   streaming zlib compression and CRC-checked chunks.
//! - In-memory `image::ImageBuffer` rendering.
//! - A `qiraster` command-line tool that writes either format to standard output.
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! qiraster = "0.1" # Replace with the latest version
//! ```
//!
//! ## Example
//!
//! Render text as a PNG with custom scale and padding:
//!
//! ```rust
//! use qiraster::{png::encode_png, GridProvider, QrCodeEcc, QrCodeProvider, RasterParams};
//!
//! let grid = QrCodeProvider.generate("https://example.com", None, QrCodeEcc::Medium).unwrap();
//! let params = RasterParams::new(8, 2).unwrap();
//! let png = encode_png(&grid, &params).unwrap();
//! assert_eq!(&png[1..4], b"PNG");
//! ```
//!
//! ## Modules
//!
//! - [`qrcode`]: Module grids and the grid provider capability.
//! - [`params`]: Scale, padding and image size limits.
//! - [`svg`]: SVG encoder.
//! - [`png`]: PNG encoder, built on [`buffer`], [`scanline`], [`chunk`] and [`compress`].
//! - [`helper`]: One-call rendering from text.

pub mod buffer;
pub mod chunk;
pub mod compress;
pub mod error;
pub mod helper;
pub mod params;
pub mod png;
pub mod qrcode;
pub mod scanline;
pub mod svg;

pub use error::{Error, Result};
pub use helper::{render, OutputFormat, RenderRequest};
pub use params::RasterParams;
pub use qrcode::{GridProvider, ModuleGrid, QrCodeEcc, QrCodeProvider, Version};

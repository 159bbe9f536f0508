//! Error types for grid rendering

use thiserror::Error;

/// Result type alias for rendering operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating or encoding a QR code image
#[derive(Error, Debug)]
pub enum Error {
    /// Scale, padding, version, level or format rejected before any output is produced
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// The computed image edge is larger than the encoders support
    #[error("Image size {size} exceeds maximum of {max} pixels")]
    ImageTooLarge { size: u64, max: u32 },

    /// The grid provider could not encode the text
    #[error("Unable to generate QR code: {0}")]
    Generation(String),

    /// Module data does not describe a square grid
    #[error("Invalid module grid: {0}")]
    InvalidGrid(String),

    /// A write would run past the end of a fixed-capacity output buffer
    #[error("Output buffer overflow: {requested} bytes requested, {remaining} remaining")]
    OutputOverflow { requested: usize, remaining: usize },

    /// The streaming compressor failed or finished in the wrong state
    #[error("Compression failed: {0}")]
    Compression(String),

    /// PNG chunk payloads are limited to 2^31-1 bytes
    #[error("PNG chunk payload of {0} bytes is too long")]
    ChunkTooLong(usize),

    /// Writing the finished document failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

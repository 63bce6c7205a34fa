//! Error types for pixel-raster operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in pixel-raster operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// A transform parameter has no finite matrix, or the transformed
    /// coordinates cannot be represented on the integer grid.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A figure was built from too few corners to be closed.
    #[error("Invalid geometry: a figure needs at least 3 corners, got {corners}")]
    InvalidGeometry {
        /// Number of corners supplied.
        corners: usize,
    },

    /// Invalid dimensions for framebuffer or canvas.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Display scale outside the supported range.
    #[error("Invalid scale: {scale} (expected 1-40 screen pixels per logical pixel)")]
    InvalidScale {
        /// Scale value.
        scale: u32,
    },

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),

    /// A shared figure state lock was poisoned by a panicking observer.
    #[error("figure state lock poisoned")]
    StatePoisoned,
}

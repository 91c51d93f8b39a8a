//! Error types for raster I/O.

use std::io;
use subpix_core::{CoreError, Size};
use thiserror::Error;

/// Result type for raster I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Raster I/O error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid or corrupted raster file.
    #[error("invalid raster file: {0}")]
    InvalidFile(String),

    /// Requested region does not fit inside the raster.
    #[error("region ({x}, {y}, {w}x{h}) exceeds raster bounds {cols}x{rows}")]
    InvalidRegion {
        /// Region column origin.
        x: usize,
        /// Region row origin.
        y: usize,
        /// Region width.
        w: usize,
        /// Region height.
        h: usize,
        /// Raster rows.
        rows: usize,
        /// Raster columns.
        cols: usize,
    },

    /// Stream block size is unusable.
    #[error("invalid block size: {0}")]
    InvalidBlockSize(String),

    /// Stream block is larger than the raster it should tile.
    #[error("block size {block} exceeds raster size {raster}")]
    BlockExceedsRaster {
        /// Requested block size.
        block: Size,
        /// Raster size.
        raster: Size,
    },

    /// The input stream has been fully consumed.
    #[error("end of stream")]
    EndOfStream,

    /// A core buffer invariant was violated.
    #[error(transparent)]
    Core(#[from] CoreError),
}

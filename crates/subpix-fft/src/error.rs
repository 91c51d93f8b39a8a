//! Error types for the spectral backend.

use subpix_core::Size;
use thiserror::Error;

/// Result type for spectral operations.
pub type FftResult<T> = std::result::Result<T, FftError>;

/// Errors raised by the FFT port.
#[derive(Debug, Error)]
pub enum FftError {
    /// Transform requested on a zero-area buffer.
    #[error("cannot transform empty buffer of size {0}")]
    EmptySize(Size),

    /// Buffer length does not match the declared dimensions.
    #[error("buffer of {actual} elements does not match size {size} (expected {expected})")]
    BufferSizeMismatch {
        /// Declared dimensions.
        size: Size,
        /// Element count implied by the dimensions.
        expected: usize,
        /// Length of the provided buffer.
        actual: usize,
    },
}

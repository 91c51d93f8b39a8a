//! Error types for core buffer operations.

use thiserror::Error;

/// Result type alias using [`CoreError`] as the error type.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Errors raised by core type construction and access.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Buffer length does not match the declared dimensions.
    #[error("buffer of {actual} samples does not match {row}x{col} ({expected} cells)")]
    BufferSizeMismatch {
        /// Declared row extent.
        row: usize,
        /// Declared column extent.
        col: usize,
        /// Cell count implied by the dimensions.
        expected: usize,
        /// Length of the provided buffer.
        actual: usize,
    },

    /// Dimensions are unusable for the requested operation.
    #[error("invalid dimensions {row}x{col}: {reason}")]
    InvalidDimensions {
        /// Row extent.
        row: usize,
        /// Column extent.
        col: usize,
        /// Why the dimensions were rejected.
        reason: String,
    },
}

impl CoreError {
    /// Creates a [`CoreError::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(row: usize, col: usize, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            row,
            col,
            reason: reason.into(),
        }
    }
}

//! Error types for translation operators.

use subpix_core::CoreError;
use subpix_fft::FftError;
use thiserror::Error;

/// Result type for translation operators.
pub type OpsResult<T> = std::result::Result<T, OpsError>;

/// Errors raised while translating an image.
#[derive(Debug, Error)]
pub enum OpsError {
    /// Input image has unusable dimensions.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The spectral backend failed.
    #[error("spectral backend failure: {0}")]
    Backend(#[from] FftError),

    /// A core buffer invariant was violated.
    #[error(transparent)]
    Core(#[from] CoreError),
}

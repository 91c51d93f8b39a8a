//! # subpix-fft
//!
//! Spectral backend for the subpix workspace: unnormalized 2-D
//! real-to-complex transforms over `rustfft`, the frequency-vector
//! conventions that go with them, and the quadrant shifts used to move the
//! DC bin between corner and center.
//!
//! The forward transform of an `H x W` real buffer produces `H * (W/2 + 1)`
//! complex bins (Hermitian half-spectrum); the inverse restores an `H x W`
//! real buffer. Neither direction normalizes - a forward/inverse round trip
//! scales by `H * W`, which is the caller's to divide out.

pub mod error;
pub mod freq;
pub mod shift;
pub mod transform;

pub use error::{FftError, FftResult};
pub use freq::fft_freq;
pub use num_complex::Complex64;
pub use shift::{fftshift2d, ifftshift2d};
pub use transform::{fft2d_r2c, fft2d_c2r};

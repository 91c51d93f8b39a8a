//! # subpix-ops
//!
//! Translation operators for single-band rasters.
//!
//! The spectral kernel ([`FrequencyTranslation`]) shifts an image by a
//! fractional number of pixels through a phase ramp in the Fourier domain
//! and crops the borders that a circular shift would have wrapped around.
//! The bilinear interpolator ([`TranslationInterpolator2D`]) is the spatial
//! counterpart used on the smooth component of the periodic-plus-smooth
//! decomposition. [`ShiftTranslator`] ties a [`Decomposition`] policy and
//! both operators into the one-call API the streaming executor consumes.
//!
//! # Example
//!
//! ```rust,ignore
//! use subpix_ops::{Decomposition, ShiftTranslator};
//!
//! let translator = ShiftTranslator::new(Decomposition::Regular, 10.5, -3.25);
//! let shifted = translator.compute(&image)?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod border;
pub mod decompose;
mod error;
pub mod interpolate;
pub mod translate;
pub mod translator;

pub use decompose::Decomposition;
pub use error::{OpsError, OpsResult};
pub use interpolate::TranslationInterpolator2D;
pub use translate::FrequencyTranslation;
pub use translator::ShiftTranslator;

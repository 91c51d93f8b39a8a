//! # subpix-core
//!
//! Core types for sub-pixel raster translation.
//!
//! This crate provides the foundational types used throughout the subpix
//! workspace:
//!
//! - [`Size`] / [`Padding`] - Raster extents and border bookkeeping
//! - [`Image`] - Owning row-major buffer of double-precision samples
//! - [`StreamBlock`] - An image tile plus its absolute raster coordinates
//! - [`GeoReference`] - Affine pixel-to-world mapping with projection string
//!
//! ## Crate Structure
//!
//! `subpix-core` is the foundation of the workspace and has no internal
//! dependencies. All other subpix crates depend on it:
//!
//! ```text
//! subpix-core (this crate)
//!    ^
//!    |
//!    +-- subpix-fft (spectral transforms)
//!    +-- subpix-ops (translation kernel, decomposition policies)
//!    +-- subpix-io (raster datasets, block streams)
//!    +-- subpix-stream (streaming executor)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod block;
pub mod error;
pub mod geo;
pub mod image;
pub mod size;

pub use block::*;
pub use error::*;
pub use geo::*;
pub use image::*;
pub use size::*;

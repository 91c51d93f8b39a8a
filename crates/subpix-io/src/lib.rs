//! # subpix-io
//!
//! Raster I/O for the subpix workspace.
//!
//! [`Dataset`] implements the raster port over a flat binary single-band
//! float64 format with a fixed little-endian header carrying the dimensions
//! and geo-reference; regions of any rectangle can be read and written
//! without touching the rest of the file.
//!
//! On top of the dataset sit the two halves of the streaming contract:
//! [`BlockInputStream`] walks a source raster in overlapping tiles sized for
//! a given shift, and [`ShiftedOutputStream`] owns a destination raster
//! pre-sized to the shrunk output extent.

pub mod dataset;
pub mod error;
pub mod input_stream;
pub mod output_stream;

pub use dataset::{load_image, save_image, Dataset};
pub use error::{IoError, IoResult};
pub use input_stream::BlockInputStream;
pub use output_stream::ShiftedOutputStream;

//! Owning image buffer for single-band double-precision rasters.
//!
//! # Memory Layout
//!
//! Images store samples in **row-major** order, top-to-bottom:
//!
//! ```text
//! Memory: [s s s s ...]  <- Row 0
//!         [s s s s ...]  <- Row 1
//!         ...
//! ```
//!
//! Every operation in the workspace treats images as immutable after
//! construction: processing returns a new [`Image`] rather than mutating in
//! place. Moving an image transfers the buffer; cloning duplicates it.

use crate::{CoreError, CoreResult, Size};

/// Owning container of a row-major `row x col` buffer of `f64` samples.
///
/// The invariant `data.len() == size.cell_count()` holds for every
/// constructed image. The empty image (`Size = (0, 0)`) is a valid sentinel.
///
/// # Example
///
/// ```rust
/// use subpix_core::{Image, Size};
///
/// let img = Image::from_data(Size::new(2, 3), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
/// assert_eq!(img.get(1, 2), 5.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Image {
    size: Size,
    data: Vec<f64>,
}

impl Image {
    /// Creates an image from a size and an existing sample buffer.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::BufferSizeMismatch`] if `data.len()` differs from
    /// `size.cell_count()`.
    pub fn from_data(size: Size, data: Vec<f64>) -> CoreResult<Self> {
        if data.len() != size.cell_count() {
            return Err(CoreError::BufferSizeMismatch {
                row: size.row,
                col: size.col,
                expected: size.cell_count(),
                actual: data.len(),
            });
        }
        Ok(Self { size, data })
    }

    /// Creates a zero-filled image of the given size.
    pub fn zeroed(size: Size) -> Self {
        Self {
            size,
            data: vec![0.0; size.cell_count()],
        }
    }

    /// The empty image sentinel (`Size = (0, 0)`).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the image dimensions.
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns `true` if the image has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Returns the sample at `(i, j)` (`i` is the row index).
    ///
    /// # Panics
    ///
    /// Panics if `(i, j)` is out of bounds.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i < self.size.row && j < self.size.col, "sample out of bounds");
        self.data[i * self.size.col + j]
    }

    /// Returns a reference to the raw sample buffer.
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Consumes the image and returns its sample buffer.
    #[inline]
    pub fn into_data(self) -> Vec<f64> {
        self.data
    }

    /// Returns row `i` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `i >= size.row`.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        debug_assert!(i < self.size.row, "row out of bounds");
        &self.data[i * self.size.col..(i + 1) * self.size.col]
    }
}

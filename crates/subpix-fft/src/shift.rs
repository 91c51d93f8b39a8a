//! Quadrant shifts moving the DC bin between corner and center.
//!
//! `ifftshift2d` rotates a buffer by `(floor(H/2), floor(W/2))` and
//! `fftshift2d` by `(ceil(H/2), ceil(W/2))`; applied in sequence they cancel
//! for odd extents as well as even ones.

use subpix_core::Size;

/// Circular shift by `(ceil(H/2), ceil(W/2))`: recenters a buffer whose DC
/// content sits at index `(0, 0)`.
#[must_use]
pub fn fftshift2d(src: &[f64], size: Size) -> Vec<f64> {
    circular_shift(src, size, size.row.div_ceil(2), size.col.div_ceil(2))
}

/// Circular shift by `(floor(H/2), floor(W/2))`: brings centered DC content
/// to index `(0, 0)`.
#[must_use]
pub fn ifftshift2d(src: &[f64], size: Size) -> Vec<f64> {
    circular_shift(src, size, size.row / 2, size.col / 2)
}

fn circular_shift(src: &[f64], size: Size, shift_row: usize, shift_col: usize) -> Vec<f64> {
    let (rows, cols) = (size.row, size.col);
    let mut dst = vec![0.0; src.len()];
    for i in 0..rows {
        let new_i = (i + shift_row) % rows;
        for j in 0..cols {
            let new_j = (j + shift_col) % cols;
            dst[new_i * cols + new_j] = src[i * cols + j];
        }
    }
    dst
}

//! Border removal shared by the spectral kernel and the interpolator.

use subpix_core::{Image, Size};
use tracing::trace;

use crate::OpsResult;

/// Removes `|row_shift|` rows and `|col_shift|` columns from an image.
///
/// A positive shift removes from the low-index side (top/left), a negative
/// one from the high-index side (bottom/right). Shifts larger than the image
/// saturate to an empty result.
pub(crate) fn remove_borders(image: &Image, row_shift: isize, col_shift: isize) -> OpsResult<Image> {
    trace!(row_shift, col_shift, "remove borders");
    if row_shift == 0 && col_shift == 0 {
        return Ok(image.clone());
    }

    let size = image.size();
    let out_size = Size::new(
        size.row.saturating_sub(row_shift.unsigned_abs()),
        size.col.saturating_sub(col_shift.unsigned_abs()),
    );
    if out_size.is_empty() {
        return Ok(Image::from_data(out_size, Vec::new())?);
    }
    let begin_row = if row_shift > 0 { row_shift.unsigned_abs() } else { 0 };
    let begin_col = if col_shift > 0 { col_shift.unsigned_abs() } else { 0 };

    let mut data = Vec::with_capacity(out_size.cell_count());
    for i in 0..out_size.row {
        let start = (begin_row + i) * size.col + begin_col;
        data.extend_from_slice(&image.data()[start..start + out_size.col]);
    }

    Ok(Image::from_data(out_size, data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_image() -> Image {
        let data: Vec<f64> = (0..16).map(|v| v as f64).collect();
        Image::from_data(Size::new(4, 4), data).unwrap()
    }

    #[test]
    fn test_zero_shift_is_identity() {
        let img = sample_image();
        let out = remove_borders(&img, 0, 0).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_positive_row_shift_drops_top() {
        let out = remove_borders(&sample_image(), 2, 0).unwrap();
        assert_eq!(out.size(), Size::new(2, 4));
        assert_eq!(out.row(0), &[8.0, 9.0, 10.0, 11.0]);
    }

    #[test]
    fn test_negative_row_shift_drops_bottom() {
        let out = remove_borders(&sample_image(), -2, 0).unwrap();
        assert_eq!(out.size(), Size::new(2, 4));
        assert_eq!(out.row(0), &[0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_positive_col_shift_drops_left() {
        let out = remove_borders(&sample_image(), 0, 1).unwrap();
        assert_eq!(out.size(), Size::new(4, 3));
        assert_eq!(out.row(0), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_negative_col_shift_drops_right() {
        let out = remove_borders(&sample_image(), 0, -1).unwrap();
        assert_eq!(out.size(), Size::new(4, 3));
        assert_eq!(out.row(3), &[12.0, 13.0, 14.0]);
    }

    #[test]
    fn test_combined_shifts() {
        let out = remove_borders(&sample_image(), 1, -2).unwrap();
        assert_eq!(out.size(), Size::new(3, 2));
        assert_eq!(out.row(0), &[4.0, 5.0]);
    }

    #[test]
    fn test_oversized_shift_saturates_to_empty() {
        let out = remove_borders(&sample_image(), 10, 0).unwrap();
        assert!(out.is_empty());
    }
}

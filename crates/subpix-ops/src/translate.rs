//! Spectral translation kernel.
//!
//! A shift splits into an integer and a fractional part. Only the fractional
//! part touches the spectrum: the buffer is rotated so its DC content sits
//! at the origin, forward-transformed, multiplied by a separable phase ramp
//! `exp(-j*2*pi*(frac_r*freq_row[i] + frac_c*freq_col[j]))`, inverse
//! transformed, rotated back and normalized by the cell count. Both parts
//! are then accounted for by cropping: the integer crop drops the rows and
//! columns a full circular shift would have wrapped around, and the
//! fractional part costs at most one extra row and column.

use std::f64::consts::PI;

use subpix_core::Image;
use subpix_fft::{fft2d_c2r, fft2d_r2c, fft_freq, fftshift2d, ifftshift2d, Complex64};
use tracing::{trace, warn};

use crate::border::remove_borders;
use crate::{OpsError, OpsResult};

/// Fourier-domain sub-pixel translation of a single image.
///
/// `shift` is pure and safe to call concurrently on distinct inputs; every
/// invocation owns its scratch buffers.
#[derive(Debug, Clone, Copy)]
pub struct FrequencyTranslation {
    row_shift: f64,
    col_shift: f64,
}

/// Rounds a fractional part away from zero: the extra border row/column the
/// sub-pixel shift costs.
fn round_away_from_zero(value: f64) -> isize {
    if value < 0.0 {
        value.floor() as isize
    } else {
        value.ceil() as isize
    }
}

impl FrequencyTranslation {
    /// Creates a kernel for the given shift, in pixels.
    pub fn new(row_shift: f64, col_shift: f64) -> Self {
        Self {
            row_shift,
            col_shift,
        }
    }

    /// Translates `image` by the configured shift.
    ///
    /// The output size is `(H - ceil(|row_shift|), W - ceil(|col_shift|))`.
    /// A shift reaching the image extent on either axis is first scaled down
    /// by the extent on both axes.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidDimensions`] for a zero-area image and
    /// [`OpsError::Backend`] if a transform fails.
    pub fn shift(&self, image: &Image) -> OpsResult<Image> {
        let size = image.size();
        if size.is_empty() {
            return Err(OpsError::InvalidDimensions(format!(
                "cannot translate {size} image"
            )));
        }

        let rows = size.row as f64;
        let cols = size.col as f64;
        let mut row_shift = self.row_shift;
        let mut col_shift = self.col_shift;
        if row_shift >= rows || col_shift >= cols || row_shift <= -rows || col_shift <= -cols {
            warn!(
                row_shift,
                col_shift,
                new_row_shift = row_shift / rows,
                new_col_shift = col_shift / cols,
                "requested shift reaches the image extent, applying the scaled-down shift instead"
            );
            row_shift /= rows;
            col_shift /= cols;
        }

        trace!(row_shift, col_shift, %size, "translate image");

        let frac_row = row_shift - row_shift.trunc();
        let frac_col = col_shift - col_shift.trunc();

        let output = if frac_row != 0.0 || frac_col != 0.0 {
            let centered = ifftshift2d(image.data(), size);
            let mut spectrum = fft2d_r2c(&centered, size)?;

            let bin_cols = size.col / 2 + 1;
            let freq_col = fft_freq(size.col, true);
            let freq_row = fft_freq(size.row, false);

            let ramp_row: Vec<Complex64> = freq_row
                .iter()
                .map(|f| Complex64::from_polar(1.0, -2.0 * PI * frac_row * f))
                .collect();
            let ramp_col: Vec<Complex64> = freq_col
                .iter()
                .map(|f| Complex64::from_polar(1.0, -2.0 * PI * frac_col * f))
                .collect();

            for i in 0..size.row {
                let row_phase = ramp_row[i];
                for j in 0..bin_cols {
                    spectrum[i * bin_cols + j] *= row_phase * ramp_col[j];
                }
            }

            let restored = fft2d_c2r(size, spectrum)?;
            let mut data = fftshift2d(&restored, size);
            let norm = size.cell_count() as f64;
            for sample in &mut data {
                *sample /= norm;
            }
            Image::from_data(size, data)?
        } else {
            image.clone()
        };

        // Truncate the borders on the side opposite to where the samples
        // would have been duplicated had the full shift been applied.
        let output = remove_borders(
            &output,
            -(row_shift.trunc() as isize),
            -(col_shift.trunc() as isize),
        )?;

        // The sub-pixel part costs at most one extra row and column.
        remove_borders(
            &output,
            round_away_from_zero(frac_row),
            round_away_from_zero(frac_col),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use subpix_core::Size;

    /// Bi-periodic test pattern whose tones land on exact transform bins,
    /// so the spectral shift reproduces the continuous translation exactly.
    fn periodic_image(size: Size) -> Image {
        let mut data = Vec::with_capacity(size.cell_count());
        for i in 0..size.row {
            for j in 0..size.col {
                data.push(periodic_value(size, i as f64, j as f64));
            }
        }
        Image::from_data(size, data).unwrap()
    }

    fn periodic_value(size: Size, i: f64, j: f64) -> f64 {
        let fi = 2.0 * PI * i / size.row as f64;
        let fj = 2.0 * PI * j / size.col as f64;
        100.0 + 40.0 * (3.0 * fi).sin() + 25.0 * (2.0 * fj).cos() + 10.0 * (fi + 2.0 * fj).sin()
    }

    fn ramp_image(size: Size) -> Image {
        let data = (0..size.cell_count()).map(|v| v as f64).collect();
        Image::from_data(size, data).unwrap()
    }

    #[test]
    fn test_identity_shift_returns_input_exactly() {
        let img = ramp_image(Size::new(32, 32));
        let out = FrequencyTranslation::new(0.0, 0.0).shift(&img).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_empty_image_rejected() {
        let result = FrequencyTranslation::new(1.0, 1.0).shift(&Image::empty());
        assert!(matches!(result, Err(OpsError::InvalidDimensions(_))));
    }

    #[test]
    fn test_positive_integer_shift_keeps_leading_samples() {
        let img = ramp_image(Size::new(32, 32));
        let out = FrequencyTranslation::new(0.0, 5.0).shift(&img).unwrap();
        assert_eq!(out.size(), Size::new(32, 27));
        for i in 0..27 {
            for j in 0..27 {
                assert_eq!(out.get(i, j), img.get(i, j));
            }
        }
    }

    #[test]
    fn test_negative_integer_shift_keeps_trailing_samples() {
        let img = ramp_image(Size::new(32, 32));
        let out = FrequencyTranslation::new(-5.0, -3.0).shift(&img).unwrap();
        assert_eq!(out.size(), Size::new(27, 29));
        for i in 0..27 {
            for j in 0..29 {
                assert_eq!(out.get(i, j), img.get(i + 5, j + 3));
            }
        }
    }

    #[test]
    fn test_output_dimension_law_sub_pixel() {
        let img = ramp_image(Size::new(64, 64));
        let out = FrequencyTranslation::new(5.72, -5.72).shift(&img).unwrap();
        assert_eq!(out.size(), Size::new(58, 58));
    }

    #[test]
    fn test_fractional_shift_matches_resampled_pattern() {
        // For a positive shift d = m + f the surviving samples read
        // u(i + 1 - f): the spectral delay by f plus the one-row crop on the
        // low-index side.
        let size = Size::new(64, 48);
        let img = periodic_image(size);
        let out = FrequencyTranslation::new(0.5, 0.0).shift(&img).unwrap();
        assert_eq!(out.size(), Size::new(63, 48));
        for i in 0..out.size().row {
            for j in 0..out.size().col {
                let expected = periodic_value(size, i as f64 + 0.5, j as f64);
                assert_relative_eq!(out.get(i, j), expected, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_negative_fractional_shift_matches_resampled_pattern() {
        // For a negative shift -(m + f) the surviving samples read
        // u(i + m + f): the spectral advance by f plus the m-row crop on the
        // low-index side.
        let size = Size::new(64, 48);
        let img = periodic_image(size);
        let out = FrequencyTranslation::new(-2.25, 0.0).shift(&img).unwrap();
        assert_eq!(out.size(), Size::new(61, 48));
        for i in 0..out.size().row {
            for j in 0..out.size().col {
                let expected = periodic_value(size, i as f64 + 2.25, j as f64);
                assert_relative_eq!(out.get(i, j), expected, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_odd_dimensions() {
        let size = Size::new(33, 47);
        let img = ramp_image(size);
        let out = FrequencyTranslation::new(1.5, -2.5).shift(&img).unwrap();
        assert_eq!(out.size(), Size::new(31, 44));
        assert!(out.data().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_shift_reaching_extent_is_scaled_down() {
        let img = ramp_image(Size::new(32, 32));
        // 32 >= extent: both shifts are divided by the extents, leaving a
        // one-row integer translation.
        let out = FrequencyTranslation::new(32.0, 0.0).shift(&img).unwrap();
        assert_eq!(out.size(), Size::new(31, 32));
        for j in 0..32 {
            assert_eq!(out.get(0, j), img.get(0, j));
        }
    }

    #[test]
    fn test_constant_image_is_preserved_by_sub_pixel_shift() {
        let img = Image::from_data(Size::new(24, 24), vec![7.25; 24 * 24]).unwrap();
        let out = FrequencyTranslation::new(0.3, -0.7).shift(&img).unwrap();
        assert_eq!(out.size(), Size::new(23, 23));
        for &v in out.data() {
            assert_relative_eq!(v, 7.25, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_inverse_pairing_on_interior() {
        let size = Size::new(64, 64);
        let img = periodic_image(size);
        let forward = FrequencyTranslation::new(3.25, -2.5).shift(&img).unwrap();
        let back = FrequencyTranslation::new(-3.25, 2.5).shift(&forward).unwrap();

        let crop_row = 4;
        let crop_col = 3;
        assert_eq!(back.size(), Size::new(64 - 2 * crop_row, 64 - 2 * crop_col));
        for i in 0..back.size().row {
            for j in 0..back.size().col {
                assert_relative_eq!(
                    back.get(i, j),
                    img.get(i + crop_row, j + crop_col),
                    epsilon = 1e-8
                );
            }
        }
    }
}

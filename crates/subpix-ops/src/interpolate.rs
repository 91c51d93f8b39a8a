//! Bilinear sub-pixel interpolation.
//!
//! Spatial counterpart of the spectral kernel, used on the smooth component
//! of the periodic-plus-smooth decomposition where the sub-pixel content is
//! low-frequency.

use subpix_core::{Image, Size};
use tracing::trace;

use crate::border::remove_borders;
use crate::{OpsError, OpsResult};

/// 2-D bilinear translation operator.
#[derive(Debug, Clone, Copy)]
pub struct TranslationInterpolator2D {
    row_shift: f64,
    col_shift: f64,
}

impl TranslationInterpolator2D {
    /// Creates an interpolator for the given shift, in pixels.
    pub fn new(row_shift: f64, col_shift: f64) -> Self {
        Self {
            row_shift,
            col_shift,
        }
    }

    /// Translates `image` by the fractional part of the configured shift and
    /// crops the borders the full shift accounts for.
    ///
    /// The input is mirror-padded to `(H+1, W+1)` by duplicating its last
    /// row and column, convolved with the pre-flipped 2x2 bilinear kernel,
    /// and cropped by `ceil(-row_shift)` rows and `ceil(-col_shift)` columns.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidDimensions`] for a zero-area image.
    pub fn interpolate2d(&self, image: &Image) -> OpsResult<Image> {
        let size = image.size();
        if size.is_empty() {
            return Err(OpsError::InvalidDimensions(format!(
                "cannot interpolate {size} image"
            )));
        }
        trace!(%size, "interpolate image");

        let beta = self.row_shift - self.row_shift.trunc();
        let alpha = self.col_shift - self.col_shift.trunc();
        trace!(alpha, beta, "bilinear weights");

        // Pre-flipped kernel: weights address (i, j), (i, j+1), (i+1, j),
        // (i+1, j+1) of the padded image.
        let kernel = [
            (1.0 - alpha) * (1.0 - beta),
            alpha * (1.0 - beta),
            beta * (1.0 - alpha),
            alpha * beta,
        ];

        let mirror_size = Size::new(size.row + 1, size.col + 1);
        let mut mirror = vec![0.0; mirror_size.cell_count()];
        for i in 0..size.row {
            for j in 0..size.col {
                mirror[i * mirror_size.col + j] = image.get(i, j);
            }
        }
        // Duplicate the last row, then the last column.
        for j in 0..size.col {
            mirror[size.row * mirror_size.col + j] = mirror[(size.row - 1) * mirror_size.col + j];
        }
        for i in 0..mirror_size.row {
            mirror[(i + 1) * mirror_size.col - 1] = mirror[(i + 1) * mirror_size.col - 2];
        }

        let mut data = Vec::with_capacity(size.cell_count());
        for i in 0..size.row {
            for j in 0..size.col {
                let idx = i * mirror_size.col + j;
                data.push(
                    mirror[idx] * kernel[0]
                        + mirror[idx + 1] * kernel[1]
                        + mirror[idx + mirror_size.col] * kernel[2]
                        + mirror[idx + mirror_size.col + 1] * kernel[3],
                );
            }
        }
        let interpolated = Image::from_data(size, data)?;

        // Crop with "- shift" so the removed borders sit where the samples
        // would have been replicated had the entire shift been applied.
        remove_borders(
            &interpolated,
            (-self.row_shift).ceil() as isize,
            (-self.col_shift).ceil() as isize,
        )
    }
}

//! Image decomposition policies applied ahead of the spectral shift.
//!
//! A raster block is implicitly periodized by the discrete Fourier
//! transform; any mismatch between opposite borders then leaks into a
//! cross-shaped artifact in the spectrum. The periodic-plus-smooth
//! decomposition splits the input `u = p + s` so that `p` periodizes
//! cleanly while the residual `s` is smooth, following Moisan's
//! construction: build the boundary-discontinuity image `v`, solve the
//! discrete Poisson equation in the Fourier domain via
//! `s_hat[k,l] = v_hat[k,l] / (2cos(2pi k/H) + 2cos(2pi l/W) - 4)` with
//! `s_hat[0,0] = 0`, and set `p = u - s`.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use subpix_core::Image;
use subpix_fft::{fft2d_c2r, fft2d_r2c, Complex64};
use tracing::trace;

use crate::{
    FrequencyTranslation, OpsError, OpsResult, TranslationInterpolator2D,
};

/// Preprocessing applied to a block before the spectral shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decomposition {
    /// Pass the block straight to the spectral kernel.
    Regular,
    /// Split into periodic and smooth components; shift the periodic part
    /// spectrally and the smooth part by bilinear interpolation.
    PeriodicSmooth,
}

impl Decomposition {
    pub(crate) fn decompose_and_process(
        &self,
        image: &Image,
        translation: &FrequencyTranslation,
        interpolator: &TranslationInterpolator2D,
    ) -> OpsResult<Image> {
        match self {
            Decomposition::Regular => {
                trace!("regular decomposition: process image");
                translation.shift(image)
            }
            Decomposition::PeriodicSmooth => {
                trace!("periodic-smooth decomposition: process image");
                let (periodic, smooth) = periodic_smooth_split(image)?;
                let shifted_periodic = translation.shift(&periodic)?;
                let shifted_smooth = interpolator.interpolate2d(&smooth)?;

                // Recombine on the common top-left extent; the spectral path
                // fixes the output size.
                let out_size = shifted_periodic.size();
                let rows = out_size.row.min(shifted_smooth.size().row);
                let cols = out_size.col.min(shifted_smooth.size().col);
                let mut data = shifted_periodic.into_data();
                for i in 0..rows {
                    for j in 0..cols {
                        data[i * out_size.col + j] += shifted_smooth.get(i, j);
                    }
                }
                Ok(Image::from_data(out_size, data)?)
            }
        }
    }
}

impl fmt::Display for Decomposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decomposition::Regular => write!(f, "regular"),
            Decomposition::PeriodicSmooth => write!(f, "periodic-smooth"),
        }
    }
}

impl FromStr for Decomposition {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regular" => Ok(Decomposition::Regular),
            "periodic-smooth" => Ok(Decomposition::PeriodicSmooth),
            other => Err(OpsError::InvalidParameter(format!(
                "unknown decomposition '{other}'"
            ))),
        }
    }
}

/// Splits `u` into `(periodic, smooth)` with `u = periodic + smooth`.
pub fn periodic_smooth_split(image: &Image) -> OpsResult<(Image, Image)> {
    let size = image.size();
    if size.is_empty() {
        return Err(OpsError::InvalidDimensions(format!(
            "cannot decompose {size} image"
        )));
    }
    let (rows, cols) = (size.row, size.col);

    // Boundary-discontinuity image: each border pixel carries the
    // wrap-around difference across its edge.
    let mut boundary = vec![0.0; size.cell_count()];
    for j in 0..cols {
        let diff = image.get(rows - 1, j) - image.get(0, j);
        boundary[j] += diff;
        boundary[(rows - 1) * cols + j] -= diff;
    }
    for i in 0..rows {
        let diff = image.get(i, cols - 1) - image.get(i, 0);
        boundary[i * cols] += diff;
        boundary[i * cols + cols - 1] -= diff;
    }

    // Poisson solve in the Fourier domain.
    let mut spectrum = fft2d_r2c(&boundary, size)?;
    let bin_cols = cols / 2 + 1;
    for k in 0..rows {
        let cos_row = (2.0 * PI * k as f64 / rows as f64).cos();
        for l in 0..bin_cols {
            let idx = k * bin_cols + l;
            if k == 0 && l == 0 {
                spectrum[idx] = Complex64::default();
                continue;
            }
            let denom = 2.0 * cos_row + 2.0 * (2.0 * PI * l as f64 / cols as f64).cos() - 4.0;
            spectrum[idx] /= denom;
        }
    }
    let mut smooth = fft2d_c2r(size, spectrum)?;
    let norm = size.cell_count() as f64;
    for sample in &mut smooth {
        *sample /= norm;
    }

    let periodic: Vec<f64> = image
        .data()
        .iter()
        .zip(smooth.iter())
        .map(|(u, s)| u - s)
        .collect();

    Ok((
        Image::from_data(size, periodic)?,
        Image::from_data(size, smooth)?,
    ))
}

//! Unnormalized 2-D real-to-complex transforms over `rustfft`.
//!
//! The forward direction runs a complex FFT over each row and keeps the
//! `W/2 + 1` non-redundant bins, then transforms each retained column. The
//! inverse runs the column transforms backwards, rebuilds the full rows from
//! Hermitian symmetry and inverse-transforms them, keeping the real part.

use num_complex::Complex64;
use rustfft::FftPlanner;
use subpix_core::Size;

use crate::{FftError, FftResult};

fn check(size: Size, expected: usize, actual: usize) -> FftResult<()> {
    if size.is_empty() {
        return Err(FftError::EmptySize(size));
    }
    if actual != expected {
        return Err(FftError::BufferSizeMismatch {
            size,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Forward real-to-complex transform of an `H x W` buffer.
///
/// Returns `H * (W/2 + 1)` bins in row-major order, unnormalized.
///
/// # Errors
///
/// Fails if the size is empty or the buffer length does not match it.
pub fn fft2d_r2c(data: &[f64], size: Size) -> FftResult<Vec<Complex64>> {
    check(size, size.cell_count(), data.len())?;
    let (rows, cols) = (size.row, size.col);
    let half_cols = cols / 2 + 1;

    let mut planner = FftPlanner::new();

    // Row-wise transforms, retaining the Hermitian half.
    let fft_row = planner.plan_fft_forward(cols);
    let mut scratch = vec![Complex64::default(); fft_row.get_inplace_scratch_len()];
    let mut row_buf = vec![Complex64::default(); cols];
    let mut spectrum = vec![Complex64::default(); rows * half_cols];
    for i in 0..rows {
        for j in 0..cols {
            row_buf[j] = Complex64::new(data[i * cols + j], 0.0);
        }
        fft_row.process_with_scratch(&mut row_buf, &mut scratch);
        spectrum[i * half_cols..(i + 1) * half_cols].copy_from_slice(&row_buf[..half_cols]);
    }

    // Column-wise transforms over the retained bins.
    let fft_col = planner.plan_fft_forward(rows);
    scratch.resize(fft_col.get_inplace_scratch_len(), Complex64::default());
    let mut col_buf = vec![Complex64::default(); rows];
    for j in 0..half_cols {
        for i in 0..rows {
            col_buf[i] = spectrum[i * half_cols + j];
        }
        fft_col.process_with_scratch(&mut col_buf, &mut scratch);
        for i in 0..rows {
            spectrum[i * half_cols + j] = col_buf[i];
        }
    }

    Ok(spectrum)
}

/// Inverse complex-to-real transform back to an `H x W` buffer.
///
/// Consumes an `H * (W/2 + 1)` half-spectrum and returns the real samples,
/// unnormalized: the caller divides by `H * W`. Bins beyond the retained
/// half are reconstructed as the conjugates of their mirrors, so any
/// asymmetry introduced by spectral edits is resolved the way a
/// complex-to-real backend would resolve it.
///
/// # Errors
///
/// Fails if the size is empty or the spectrum length does not match it.
pub fn fft2d_c2r(size: Size, mut spectrum: Vec<Complex64>) -> FftResult<Vec<f64>> {
    let (rows, cols) = (size.row, size.col);
    let half_cols = cols / 2 + 1;
    check(size, rows * half_cols, spectrum.len())?;

    let mut planner = FftPlanner::new();

    // Inverse column transforms.
    let ifft_col = planner.plan_fft_inverse(rows);
    let mut scratch = vec![Complex64::default(); ifft_col.get_inplace_scratch_len()];
    let mut col_buf = vec![Complex64::default(); rows];
    for j in 0..half_cols {
        for i in 0..rows {
            col_buf[i] = spectrum[i * half_cols + j];
        }
        ifft_col.process_with_scratch(&mut col_buf, &mut scratch);
        for i in 0..rows {
            spectrum[i * half_cols + j] = col_buf[i];
        }
    }

    // Hermitian reconstruction and inverse row transforms.
    let ifft_row = planner.plan_fft_inverse(cols);
    scratch.resize(ifft_row.get_inplace_scratch_len(), Complex64::default());
    let mut row_buf = vec![Complex64::default(); cols];
    let mut output = vec![0.0; rows * cols];
    for i in 0..rows {
        let half_row = &spectrum[i * half_cols..(i + 1) * half_cols];
        row_buf[..half_cols].copy_from_slice(half_row);
        for j in half_cols..cols {
            row_buf[j] = half_row[cols - j].conj();
        }
        ifft_row.process_with_scratch(&mut row_buf, &mut scratch);
        for j in 0..cols {
            output[i * cols + j] = row_buf[j].re;
        }
    }

    Ok(output)
}

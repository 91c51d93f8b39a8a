//! Sample frequency vectors matching the transform bin layout.

/// Returns the sample frequencies of an `n`-point transform, in cycles per
/// sample.
///
/// With `half == true` the vector covers the retained half-axis of a
/// real-to-complex transform: `{0, 1/n, ..., floor(n/2)/n}` (length
/// `n/2 + 1`). With `half == false` it covers the full axis in transform bin
/// order, the negative half following the positive one:
/// `{0, 1/n, ..., floor((n-1)/2)/n, -floor(n/2)/n, ..., -1/n}` (length `n`).
///
/// # Example
///
/// ```rust
/// use subpix_fft::fft_freq;
///
/// assert_eq!(fft_freq(4, false), vec![0.0, 0.25, -0.5, -0.25]);
/// assert_eq!(fft_freq(4, true), vec![0.0, 0.25, 0.5]);
/// ```
pub fn fft_freq(n: usize, half: bool) -> Vec<f64> {
    let step = 1.0 / n as f64;
    if half {
        (0..=n / 2).map(|k| k as f64 * step).collect()
    } else {
        let mut freqs = Vec::with_capacity(n);
        for k in 0..=(n - 1) / 2 {
            freqs.push(k as f64 * step);
        }
        for k in (1..=n / 2).rev() {
            freqs.push(-(k as f64) * step);
        }
        freqs
    }
}

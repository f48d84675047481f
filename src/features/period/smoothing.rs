//! Gaussian smoothing of the interval histogram
//!
//! The raw histogram is a sparse set of spikes. Convolving it with a wide
//! normalized Gaussian merges neighbouring bins that describe the same beat
//! period, so the maximum of the smoothed curve marks the best-supported
//! interval rather than the single tallest spike.
//!
//! # Alignment
//!
//! The histogram is zero-padded by `K - 1` bins on both sides and correlated
//! with the kernel; the output is sliced from `K / 2` for `H` bins. A unit
//! impulse at bin `b` then peaks at bin `b` in the output (exactly, for odd
//! `K`).

use crate::error::AnalysisError;
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Build a Gaussian kernel normalized to sum to 1
///
/// # Arguments
///
/// * `size` - Kernel length in bins
/// * `sigma` - Standard deviation in bins
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if `size` is zero or `sigma` is not a
/// positive finite number.
///
/// # Example
///
/// ```
/// use wavelet_tempo::features::period::smoothing::gaussian_kernel;
///
/// let kernel = gaussian_kernel(2205, 360.0)?;
/// let sum: f32 = kernel.iter().sum();
/// assert!((sum - 1.0).abs() < 1e-4);
/// # Ok::<(), wavelet_tempo::AnalysisError>(())
/// ```
pub fn gaussian_kernel(size: usize, sigma: f32) -> Result<Vec<f32>, AnalysisError> {
    if size == 0 {
        return Err(AnalysisError::InvalidInput(
            "Gaussian kernel size must be at least 1".to_string(),
        ));
    }

    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(AnalysisError::InvalidInput(format!(
            "Invalid Gaussian sigma: {}",
            sigma
        )));
    }

    let center = (size - 1) as f32 / 2.0;
    let denominator = 2.0 * sigma * sigma;
    let mut kernel: Vec<f32> = (0..size)
        .map(|i| {
            let x = i as f32 - center;
            (-(x * x) / denominator).exp()
        })
        .collect();

    // The center tap is always 1.0, so the sum never vanishes
    let total: f32 = kernel.iter().sum();
    for value in &mut kernel {
        *value /= total;
    }

    Ok(kernel)
}

/// Smooth a histogram with a kernel, keeping bin alignment
///
/// Computed as an FFT linear convolution in `f64`; equivalent to the direct
/// padded correlation described in the module docs.
///
/// # Arguments
///
/// * `histogram` - Raw histogram (`H` bins)
/// * `kernel` - Smoothing kernel (`K` taps)
///
/// # Returns
///
/// Smoothed histogram of length `H`
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if the kernel is empty.
pub fn smooth_histogram(histogram: &[f32], kernel: &[f32]) -> Result<Vec<f32>, AnalysisError> {
    if kernel.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "Smoothing kernel is empty".to_string(),
        ));
    }

    if histogram.is_empty() {
        return Ok(vec![]);
    }

    let h = histogram.len();
    let k = kernel.len();
    let full_len = h + k - 1;
    let fft_size = full_len.next_power_of_two();

    log::debug!(
        "Smoothing histogram: {} bins, kernel {} taps, FFT size {}",
        h,
        k,
        fft_size
    );

    let mut signal: Vec<Complex<f64>> = histogram
        .iter()
        .map(|&x| Complex::new(x as f64, 0.0))
        .collect();
    signal.resize(fft_size, Complex::new(0.0, 0.0));

    // Correlation with the kernel is convolution with its reverse
    let mut taps: Vec<Complex<f64>> = kernel
        .iter()
        .rev()
        .map(|&x| Complex::new(x as f64, 0.0))
        .collect();
    taps.resize(fft_size, Complex::new(0.0, 0.0));

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(fft_size);
    fft.process(&mut signal);
    fft.process(&mut taps);

    for (s, t) in signal.iter_mut().zip(&taps) {
        *s *= *t;
    }

    let ifft = planner.plan_fft_inverse(fft_size);
    ifft.process(&mut signal);

    let scale = 1.0 / fft_size as f64;
    let offset = k / 2;
    let smoothed = signal[offset..offset + h]
        .iter()
        .map(|x| (x.re * scale) as f32)
        .collect();

    Ok(smoothed)
}

/// First index of the maximum value
///
/// Ties resolve to the lowest index. Returns `None` for an empty slice or one
/// with no finite values.
pub fn peak_bin(values: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        if !v.is_finite() {
            continue;
        }
        match best {
            Some((_, best_value)) if v <= best_value => {}
            _ => best = Some((i, v)),
        }
    }
    best
}

//! Dynamic range (RMS energy) of a sample buffer
//!
//! Independent of the tempo pipeline; useful for gating or displaying the
//! loudness of a buffer before analysis.
//!
//! # Example
//!
//! ```
//! use wavelet_tempo::preprocessing::dynamic_range::{dynamic_range, dynamic_range_db};
//!
//! let samples = vec![0.5f32; 44100];
//! assert!((dynamic_range(&samples) - 0.5).abs() < 1e-6);
//! assert!((dynamic_range_db(&samples) + 6.0206).abs() < 1e-3);
//! ```

/// Numerical stability epsilon for the dB conversion
const EPSILON: f32 = 1e-10;

/// Root-mean-square energy: `sqrt(mean(x^2))`
///
/// Returns 0.0 for an empty buffer.
pub fn dynamic_range(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    // Accumulate in f64 so long buffers keep constant input exact
    let sum_sq: f64 = samples.iter().map(|&x| (x as f64) * (x as f64)).sum();
    (sum_sq / samples.len() as f64).sqrt() as f32
}

/// RMS level in dBFS, `f32::NEG_INFINITY` for silent or empty buffers
pub fn dynamic_range_db(samples: &[f32]) -> f32 {
    let rms = dynamic_range(samples);
    if rms > EPSILON {
        20.0 * rms.log10()
    } else {
        f32::NEG_INFINITY
    }
}

//! Single-level two-channel Daubechies filter bank
//!
//! # Algorithm
//!
//! 1. Extend the input at the tail with its own first `L / 2` samples
//!    (circular padding, `L` = filter length)
//! 2. Correlate the padded input with the scaling filter and with its
//!    quadrature mirror: `y[n] = Σ x[n + p] · h[p]`, terms past the padded end
//!    contribute zero
//! 3. Keep every second output sample, starting at index 0
//!
//! Both outputs are computed from the same padded buffer so they stay
//! time-aligned, and both have length `ceil((N + L / 2) / 2)`.

use super::Daubechies;
use crate::error::AnalysisError;

/// Output of one decomposition level
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    /// Low-pass coefficients, input to the next level
    pub approximation: Vec<f32>,
    /// High-pass coefficients, onset-sensitive
    pub detail: Vec<f32>,
}

/// Two-channel analysis filter bank for one Daubechies family
#[derive(Debug, Clone)]
pub struct FilterBank {
    wavelet: Daubechies,
    low_pass: Vec<f32>,
    high_pass: Vec<f32>,
}

impl FilterBank {
    /// Build the filter pair for a wavelet family
    pub fn new(wavelet: Daubechies) -> Self {
        Self {
            wavelet,
            low_pass: wavelet.coefficients().to_vec(),
            high_pass: wavelet.mirror_coefficients(),
        }
    }

    /// Wavelet family of this bank
    pub fn wavelet(&self) -> Daubechies {
        self.wavelet
    }

    /// Filter length in taps
    pub fn filter_len(&self) -> usize {
        self.low_pass.len()
    }

    /// Number of samples appended by circular padding
    pub fn padding(&self) -> usize {
        self.filter_len() / 2
    }

    /// Length of both outputs for an input of `input_len` samples
    pub fn output_len(&self, input_len: usize) -> usize {
        (input_len + self.padding()).div_ceil(2)
    }

    /// Run one decomposition level
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` if the input is shorter than the
    /// filter.
    ///
    /// # Example
    ///
    /// ```
    /// use wavelet_tempo::features::wavelet::{Daubechies, FilterBank};
    ///
    /// let bank = FilterBank::new(Daubechies::Db2);
    /// let level = bank.decompose(&[1.0, 0.0, 0.0, 0.0, 0.0, 0.0])?;
    /// assert_eq!(level.approximation.len(), 4);
    /// assert_eq!(level.detail.len(), 4);
    /// # Ok::<(), wavelet_tempo::AnalysisError>(())
    /// ```
    pub fn decompose(&self, input: &[f32]) -> Result<Decomposition, AnalysisError> {
        if input.len() < self.filter_len() {
            return Err(AnalysisError::InvalidInput(format!(
                "Input of {} samples is shorter than the {:?} filter ({} taps)",
                input.len(),
                self.wavelet,
                self.filter_len()
            )));
        }

        let mut padded = Vec::with_capacity(input.len() + self.padding());
        padded.extend_from_slice(input);
        padded.extend_from_slice(&input[..self.padding()]);

        Ok(Decomposition {
            approximation: correlate_decimate(&padded, &self.low_pass),
            detail: correlate_decimate(&padded, &self.high_pass),
        })
    }
}

/// Correlate with `filter` and keep even output indices
fn correlate_decimate(signal: &[f32], filter: &[f32]) -> Vec<f32> {
    (0..signal.len())
        .step_by(2)
        .map(|n| {
            signal[n..]
                .iter()
                .zip(filter)
                .map(|(&x, &h)| x * h)
                .sum::<f32>()
        })
        .collect()
}

/// Minimum input length that survives `levels` decompositions with `wavelet`
///
/// Every level must receive at least one filter length of input.
pub fn min_input_len(wavelet: Daubechies, levels: usize) -> usize {
    let bank = FilterBank::new(wavelet);
    let mut required = bank.filter_len();
    // Walk backwards: the smallest n whose output length reaches `required`
    for _ in 1..levels {
        let mut n = bank.filter_len();
        while bank.output_len(n) < required {
            n += 1;
        }
        required = n;
    }
    required
}

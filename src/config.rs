//! Configuration parameters for tempo estimation
//!
//! The defaults are the detector's empirical calibration. Changing them changes
//! every estimate; they are exposed for experimentation, not tuning per track.

use crate::error::AnalysisError;
use crate::features::wavelet::Daubechies;

/// Deepest supported decomposition (scale factor 2^16)
const MAX_LEVELS: usize = 16;

/// Analysis configuration parameters
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    // Decomposition
    /// Number of wavelet decomposition levels (default: 4)
    pub levels: usize,

    /// Wavelet family used at every level (default: db2)
    pub wavelet: Daubechies,

    // Peak picking
    /// Peak window is `sample_rate / window_divisor` samples at level 0,
    /// halved at every level (default: 8.0, i.e. 125 ms)
    pub window_divisor: f32,

    /// Windows per hop cycle: the hop is `window / windows_per_hop_cycle`
    /// (default: 20)
    pub windows_per_hop_cycle: usize,

    /// Fraction of a hop cycle a window maximum must persist for to count as a
    /// stable peak (default: 0.9)
    pub stability_ratio: f32,

    // Interval weighting
    /// Neighbours compared on each side of an interval (default: 4, so 9
    /// positions are tested per interval)
    pub neighborhood: usize,

    /// Scale of the beat deviation curve `ms = scale * bpm^exponent`
    /// (default: 320.67)
    pub deviation_scale: f32,

    /// Exponent of the beat deviation curve (default: -0.3388)
    pub deviation_exponent: f32,

    // Histogram smoothing
    /// Gaussian kernel length in histogram bins (default: 2205)
    pub smoothing_kernel_size: usize,

    /// Gaussian standard deviation in histogram bins (default: 360.0)
    pub smoothing_sigma: f32,

    // Output
    /// Attach raw and smoothed histograms to the result (default: true)
    pub include_debug: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            levels: 4,
            wavelet: Daubechies::Db2,
            window_divisor: 8.0,
            windows_per_hop_cycle: 20,
            stability_ratio: 0.9,
            neighborhood: 4,
            deviation_scale: 320.67,
            deviation_exponent: -0.3388,
            smoothing_kernel_size: 2205,
            smoothing_sigma: 360.0,
            include_debug: true,
        }
    }
}

impl AnalysisConfig {
    /// Minimum run length for a window maximum to be kept as a stable peak
    pub fn min_peak_persistence(&self) -> f32 {
        self.windows_per_hop_cycle as f32 * self.stability_ratio
    }

    /// Number of positions compared per interval (`2 * neighborhood + 1`)
    pub fn comparisons_per_interval(&self) -> usize {
        2 * self.neighborhood + 1
    }

    /// Check that every parameter is usable
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` naming the first offending field.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.levels == 0 || self.levels > MAX_LEVELS {
            return Err(AnalysisError::InvalidInput(format!(
                "Invalid decomposition levels: {} (expected 1-{})",
                self.levels, MAX_LEVELS
            )));
        }

        if !self.window_divisor.is_finite() || self.window_divisor <= 0.0 {
            return Err(AnalysisError::InvalidInput(format!(
                "Invalid window divisor: {}",
                self.window_divisor
            )));
        }

        if self.windows_per_hop_cycle == 0 {
            return Err(AnalysisError::InvalidInput(
                "Windows per hop cycle must be at least 1".to_string(),
            ));
        }

        if !(self.stability_ratio > 0.0 && self.stability_ratio <= 1.0) {
            return Err(AnalysisError::InvalidInput(format!(
                "Invalid stability ratio: {} (expected (0, 1])",
                self.stability_ratio
            )));
        }

        if self.neighborhood == 0 {
            return Err(AnalysisError::InvalidInput(
                "Neighborhood must be at least 1".to_string(),
            ));
        }

        if !self.deviation_scale.is_finite()
            || self.deviation_scale <= 0.0
            || !self.deviation_exponent.is_finite()
        {
            return Err(AnalysisError::InvalidInput(format!(
                "Invalid deviation curve: {} * bpm^{}",
                self.deviation_scale, self.deviation_exponent
            )));
        }

        if self.smoothing_kernel_size == 0 {
            return Err(AnalysisError::InvalidInput(
                "Smoothing kernel size must be at least 1".to_string(),
            ));
        }

        if !self.smoothing_sigma.is_finite() || self.smoothing_sigma <= 0.0 {
            return Err(AnalysisError::InvalidInput(format!(
                "Invalid smoothing sigma: {}",
                self.smoothing_sigma
            )));
        }

        Ok(())
    }
}

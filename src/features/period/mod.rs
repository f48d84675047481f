//! Period estimation from a wavelet decomposition
//!
//! Converts the per-level detail coefficients into a beat period:
//! - Stable peak picking and inter-onset intervals (`peak_picking`)
//! - Similarity-weighted interval histogram (`histogram`)
//! - Gaussian smoothing and peak lookup (`smoothing`)
//!
//! # Example
//!
//! ```
//! use wavelet_tempo::features::period::estimate_period;
//! use wavelet_tempo::AnalysisConfig;
//!
//! // 120 BPM click train at 22.05 kHz
//! let sample_rate = 22050.0;
//! let mut samples = vec![0.0f32; 22050 * 12];
//! for i in (5512..samples.len()).step_by(11025) {
//!     samples[i] = 1.0;
//! }
//!
//! let estimate = estimate_period(&samples, sample_rate, &AnalysisConfig::default())?;
//! assert!((estimate.bpm - 120.0).abs() < 2.0);
//! # Ok::<(), wavelet_tempo::AnalysisError>(())
//! ```

pub mod histogram;
pub mod peak_picking;
pub mod smoothing;

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::features::wavelet::{min_input_len, FilterBank};
use histogram::{accumulate_level, IntervalHistogram};
use peak_picking::extract_level_peaks;
use serde::{Deserialize, Serialize};
use smoothing::{gaussian_kernel, peak_bin, smooth_histogram};

/// Decomposition level and its time-scale factor `2^level`
///
/// Interval lengths measured at this level are multiplied by `factor` to
/// express them at the rate of the first detail level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelScale {
    /// Level index, 0 for the first decomposition
    pub level: usize,
    /// `2^level`
    pub factor: usize,
}

impl LevelScale {
    /// Scale of decomposition level `level`
    pub fn new(level: usize) -> Self {
        Self {
            level,
            factor: 1 << level,
        }
    }

    /// Scale factor as `f32`
    pub fn factor_f32(&self) -> f32 {
        self.factor as f32
    }
}

/// Per-level diagnostics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSummary {
    /// Level index and scale factor
    pub scale: LevelScale,
    /// Length of the level's detail sequence
    pub detail_len: usize,
    /// Peak picking window length
    pub window_len: usize,
    /// Window maxima before run-length compression
    pub candidates: usize,
    /// Peaks that passed the stability filter
    pub stable_peaks: usize,
    /// Inter-onset intervals derived from the stable peaks
    pub intervals: usize,
    /// Intervals that voted into the histogram
    pub votes: usize,
    /// Scored intervals dropped for falling outside the histogram
    pub dropped: usize,
    /// True if the level had too few intervals to vote
    pub skipped: bool,
}

/// Period estimate with the histograms it was read from
#[derive(Debug, Clone)]
pub struct PeriodEstimate {
    /// Tempo in beats per minute
    pub bpm: f32,
    /// Smoothed histogram bin holding the maximum
    pub peak_bin: usize,
    /// Raw weighted interval histogram
    pub occurrence: Vec<f32>,
    /// Smoothed histogram
    pub amplitude: Vec<f32>,
    /// One entry per decomposition level
    pub levels: Vec<LevelSummary>,
}

/// Check samples, sample rate and configuration before analysis
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if:
/// - The configuration is invalid
/// - The sample rate is not finite or below 2 Hz (no histogram bins)
/// - The buffer is empty or too short for the configured decomposition
pub fn validate_input(
    samples: &[f32],
    sample_rate: f32,
    config: &AnalysisConfig,
) -> Result<(), AnalysisError> {
    config.validate()?;

    if samples.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "Empty audio samples".to_string(),
        ));
    }

    if !sample_rate.is_finite() || sample_rate < 2.0 {
        return Err(AnalysisError::InvalidInput(format!(
            "Invalid sample rate: {}",
            sample_rate
        )));
    }

    let required = min_input_len(config.wavelet, config.levels);
    if samples.len() < required {
        return Err(AnalysisError::InvalidInput(format!(
            "Need at least {} samples for {} levels of {:?}, got {}",
            required,
            config.levels,
            config.wavelet,
            samples.len()
        )));
    }

    Ok(())
}

/// Estimate the beat period of a mono signal
///
/// # Arguments
///
/// * `samples` - Mono audio samples
/// * `sample_rate` - Sample rate in Hz
/// * `config` - Analysis configuration
///
/// # Returns
///
/// `PeriodEstimate` with the BPM, the raw and smoothed histograms and per-level
/// diagnostics
///
/// # Errors
///
/// - `AnalysisError::InvalidInput` for inputs rejected by [`validate_input`]
/// - `AnalysisError::NoTempoFound` if no level cast a non-zero vote
/// - `AnalysisError::NumericalError` if the estimate is not finite
///
/// # Algorithm
///
/// For each level `k`: decompose the current approximation, rectify the
/// detail, extract stable peaks and intervals, vote them into the shared
/// histogram, and carry the approximation forward. Levels with
/// `neighborhood` (4) or fewer intervals are skipped. The histogram is then
/// smoothed and its maximum bin `b` gives `bpm = (sample_rate / 2 * 60) / b`.
pub fn estimate_period(
    samples: &[f32],
    sample_rate: f32,
    config: &AnalysisConfig,
) -> Result<PeriodEstimate, AnalysisError> {
    validate_input(samples, sample_rate, config)?;

    log::debug!(
        "Estimating period: {} samples at {} Hz, {} levels of {:?}",
        samples.len(),
        sample_rate,
        config.levels,
        config.wavelet
    );

    let bank = FilterBank::new(config.wavelet);
    let mut histogram = IntervalHistogram::for_sample_rate(sample_rate);
    let mut levels = Vec::with_capacity(config.levels);
    let mut approximation = samples.to_vec();

    for level in 0..config.levels {
        let scale = LevelScale::new(level);
        let decomposition = bank.decompose(&approximation)?;

        // Full-wave rectification
        let detail: Vec<f32> = decomposition.detail.iter().map(|x| x.abs()).collect();
        let level_peaks = extract_level_peaks(&detail, scale, sample_rate, config);

        let mut summary = LevelSummary {
            scale,
            detail_len: detail.len(),
            window_len: level_peaks.window_len,
            candidates: level_peaks.candidates,
            stable_peaks: level_peaks.peaks.len(),
            intervals: level_peaks.intervals.len(),
            votes: 0,
            dropped: 0,
            skipped: false,
        };

        if level_peaks.intervals.len() <= config.neighborhood {
            log::debug!(
                "Level {}: skipped ({} intervals)",
                level,
                level_peaks.intervals.len()
            );
            summary.skipped = true;
        } else {
            let votes = accumulate_level(
                &mut histogram,
                &level_peaks.peaks,
                &level_peaks.intervals,
                scale,
                sample_rate,
                config,
            );
            summary.votes = votes.accepted;
            summary.dropped = votes.dropped;
        }

        levels.push(summary);
        approximation = decomposition.approximation;
    }

    let total_weight = histogram.total_weight();
    if total_weight <= 0.0 {
        log::warn!(
            "No decomposition level produced interval votes ({} levels skipped)",
            levels.iter().filter(|l| l.skipped).count()
        );
        return Err(AnalysisError::NoTempoFound(format!(
            "No periodic peaks found in {} decomposition levels",
            config.levels
        )));
    }

    let kernel = gaussian_kernel(config.smoothing_kernel_size, config.smoothing_sigma)?;
    let amplitude = smooth_histogram(histogram.bins(), &kernel)?;

    let (bin, value) = match peak_bin(&amplitude) {
        Some((bin, value)) if bin > 0 && value > 0.0 => (bin, value),
        _ => {
            return Err(AnalysisError::NoTempoFound(
                "Smoothed histogram has no peak above bin 0".to_string(),
            ))
        }
    };

    let bpm = (sample_rate / 2.0 * 60.0) / bin as f32;
    if !bpm.is_finite() {
        return Err(AnalysisError::NumericalError(format!(
            "Non-finite BPM from bin {}",
            bin
        )));
    }

    log::debug!(
        "Histogram peak at bin {} (amplitude {:.4}, total weight {:.2}): {:.2} BPM",
        bin,
        value,
        total_weight,
        bpm
    );

    Ok(PeriodEstimate {
        bpm,
        peak_bin: bin,
        occurrence: histogram.into_bins(),
        amplitude,
        levels,
    })
}

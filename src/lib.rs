//! # Wavelet Tempo
//!
//! Tempo (BPM) estimation for mono audio using a discrete wavelet transform
//! and a similarity-weighted inter-onset interval histogram.
//!
//! ## Quick Start
//!
//! ```no_run
//! use wavelet_tempo::compute;
//!
//! // Load audio samples (mono, f32)
//! let samples: Vec<f32> = vec![]; // Your audio data
//! let sample_rate = 44100.0;
//!
//! let result = compute(&samples, sample_rate)?;
//! println!("BPM: {:.2}", result.bpm);
//! # Ok::<(), wavelet_tempo::AnalysisError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Samples → Wavelet Filter Bank (x4 levels) → Stable Peaks / IOIs
//!         → Weighted Histogram → Gaussian Smoothing → Peak Bin → BPM
//! ```
//!
//! - [`features::wavelet`]: Daubechies filter bank
//! - [`features::period`]: peak picking, interval histogram, smoothing
//! - [`preprocessing::dynamic_range`]: RMS helper
//! - [`analysis`]: result and metadata types
//!
//! Every call allocates its own buffers and touches no global state, so
//! independent buffers can be analyzed from several threads at once.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod preprocessing;

// Re-export main types
pub use analysis::metadata::AnalysisMetadata;
pub use analysis::result::{BpmResult, HistogramDebug};
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use features::period::LevelSummary;
pub use features::wavelet::Daubechies;

/// Estimate the tempo of a mono buffer with the default configuration
///
/// # Arguments
///
/// * `samples` - Mono audio samples
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
///
/// `BpmResult` with the BPM, the debug histograms and analysis metadata
///
/// # Errors
///
/// - `AnalysisError::InvalidInput` for an empty or too-short buffer, or an
///   invalid sample rate
/// - `AnalysisError::NoTempoFound` when no periodic structure was found (for
///   example in silence)
///
/// # Example
///
/// ```
/// use wavelet_tempo::compute;
///
/// // Clicks every 0.5 s at 22.05 kHz
/// let mut samples = vec![0.0f32; 22050 * 12];
/// for i in (5512..samples.len()).step_by(11025) {
///     samples[i] = 1.0;
/// }
///
/// let result = compute(&samples, 22050.0)?;
/// assert!((result.bpm - 120.0).abs() < 2.0);
/// # Ok::<(), wavelet_tempo::AnalysisError>(())
/// ```
pub fn compute(samples: &[f32], sample_rate: f32) -> Result<BpmResult, AnalysisError> {
    compute_with_config(samples, sample_rate, &AnalysisConfig::default())
}

/// Estimate the tempo of a mono buffer
///
/// See [`compute`]. The configuration is validated before any processing.
pub fn compute_with_config(
    samples: &[f32],
    sample_rate: f32,
    config: &AnalysisConfig,
) -> Result<BpmResult, AnalysisError> {
    use std::time::Instant;
    let start_time = Instant::now();

    log::debug!(
        "Starting tempo analysis: {} samples at {} Hz",
        samples.len(),
        sample_rate
    );

    if samples.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "Empty audio samples".to_string(),
        ));
    }

    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(AnalysisError::InvalidInput(format!(
            "Invalid sample rate: {}",
            sample_rate
        )));
    }

    let estimate = features::period::estimate_period(samples, sample_rate, config)?;

    let processing_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;

    log::debug!(
        "Tempo analysis finished: {:.2} BPM in {:.2} ms",
        estimate.bpm,
        processing_time_ms
    );

    let debug = if config.include_debug {
        Some(HistogramDebug {
            occurrence: estimate.occurrence,
            amplitude: estimate.amplitude,
        })
    } else {
        None
    };

    Ok(BpmResult {
        bpm: estimate.bpm,
        debug,
        metadata: AnalysisMetadata {
            duration_seconds: samples.len() as f32 / sample_rate,
            sample_rate,
            processing_time_ms,
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            peak_bin: estimate.peak_bin,
            levels: estimate.levels,
        },
    })
}

/// Root-mean-square energy of a buffer
///
/// Shorthand for [`preprocessing::dynamic_range::dynamic_range`].
pub fn dynamic_range(samples: &[f32]) -> f32 {
    preprocessing::dynamic_range::dynamic_range(samples)
}

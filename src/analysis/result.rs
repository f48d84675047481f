//! BPM result types

use super::metadata::AnalysisMetadata;
use serde::{Deserialize, Serialize};

/// Raw and smoothed interval histograms, for visualization
///
/// Both sequences share the same bins: bin `b` is an interval of `b` samples
/// at half the analyzed sample rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramDebug {
    /// Weighted interval votes
    pub occurrence: Vec<f32>,
    /// Gaussian-smoothed votes
    pub amplitude: Vec<f32>,
}

impl HistogramDebug {
    /// Number of bins
    pub fn len(&self) -> usize {
        self.occurrence.len()
    }

    /// True if the histograms have no bins
    pub fn is_empty(&self) -> bool {
        self.occurrence.is_empty()
    }

    /// Beat interval in seconds represented by `bin`
    ///
    /// # Example
    ///
    /// ```
    /// use wavelet_tempo::analysis::result::HistogramDebug;
    ///
    /// let debug = HistogramDebug {
    ///     occurrence: vec![0.0; 22050],
    ///     amplitude: vec![0.0; 22050],
    /// };
    /// assert_eq!(debug.interval_seconds(11025), 0.5);
    /// ```
    pub fn interval_seconds(&self, bin: usize) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        bin as f32 / self.len() as f32
    }

    /// `(interval_seconds, occurrence, amplitude)` for every bin
    pub fn points(&self) -> Vec<(f32, f32, f32)> {
        self.occurrence
            .iter()
            .zip(&self.amplitude)
            .enumerate()
            .map(|(bin, (&occurrence, &amplitude))| {
                (self.interval_seconds(bin), occurrence, amplitude)
            })
            .collect()
    }
}

/// Tempo estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BpmResult {
    /// Tempo in beats per minute
    pub bpm: f32,

    /// Histograms the tempo was read from (omitted when disabled in the config)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<HistogramDebug>,

    /// Analysis metadata
    pub metadata: AnalysisMetadata,
}

impl BpmResult {
    /// Beat period in seconds
    pub fn beat_period_seconds(&self) -> f32 {
        60.0 / self.bpm
    }
}

//! Similarity-weighted inter-onset interval histogram
//!
//! Each interval votes for its own length, weighted by how well a perfectly
//! periodic grid with that period predicts the neighbouring peaks.
//!
//! # Algorithm
//!
//! For every interval `ioi[i]` with `neighborhood` intervals on both sides:
//!
//! 1. Provisional tempo: `bpm = (sample_rate / 2 * 60) / ioi[i]`
//! 2. Allowed deviation from the empirical curve `ms = 320.67 * bpm^-0.3388`,
//!    converted to samples at half the sample rate and divided by `2^k`
//! 3. For each offset `j` in `-n..=n`, vote if
//!    `|peak[i + j] - (peak[i] + j * ioi[i])| <= deviation`
//! 4. Add `votes / (2n + 1)` to bin `ioi[i] * 2^k`
//!
//! Bins are interval lengths at half the input sample rate (the rate of
//! the first detail level), so every level votes in the same units. Intervals
//! outside `(0, len)` are dropped.

use super::LevelScale;
use crate::config::AnalysisConfig;
use serde::{Deserialize, Serialize};

/// Weighted vote accumulator indexed by interval length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalHistogram {
    bins: Vec<f32>,
}

impl IntervalHistogram {
    /// Create an empty histogram with `len` bins
    pub fn new(len: usize) -> Self {
        Self {
            bins: vec![0.0; len],
        }
    }

    /// Histogram covering intervals up to one second, i.e. tempos down to
    /// 60 BPM (`floor(sample_rate / 2)` half-rate bins)
    pub fn for_sample_rate(sample_rate: f32) -> Self {
        let len = if sample_rate.is_finite() && sample_rate > 0.0 {
            (sample_rate / 2.0) as usize
        } else {
            0
        };
        Self::new(len)
    }

    /// Number of bins
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// True if the histogram has no bins
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Accumulated vote weights
    pub fn bins(&self) -> &[f32] {
        &self.bins
    }

    /// Consume the histogram, returning its bins
    pub fn into_bins(self) -> Vec<f32> {
        self.bins
    }

    /// Sum of all accumulated weights
    pub fn total_weight(&self) -> f32 {
        self.bins.iter().sum()
    }

    /// Add `weight` to the bin for `interval`
    ///
    /// Returns `false` (and changes nothing) when the interval is zero or not
    /// below the histogram length.
    pub fn add_vote(&mut self, interval: usize, weight: f32) -> bool {
        if interval == 0 || interval >= self.bins.len() {
            return false;
        }
        self.bins[interval] += weight;
        true
    }
}

/// Outcome of voting one level into the histogram
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelVotes {
    /// Intervals that had a full neighbourhood and were scored
    pub scored: usize,
    /// Scored intervals whose scaled length landed inside the histogram
    pub accepted: usize,
    /// Scored intervals dropped for falling outside the histogram
    pub dropped: usize,
}

/// Allowed deviation, in samples at this level, for a beat period of `interval`
///
/// # Arguments
///
/// * `interval` - Candidate beat period in samples at this level
/// * `sample_rate` - Sample rate of the input signal in Hz
/// * `scale` - Level scale
/// * `config` - Deviation curve parameters
pub fn beat_tolerance(
    interval: usize,
    sample_rate: f32,
    scale: LevelScale,
    config: &AnalysisConfig,
) -> f32 {
    let half_rate = sample_rate / 2.0;
    let tempo_bpm = (half_rate * 60.0) / interval as f32;
    let deviation_ms = config.deviation_scale * tempo_bpm.powf(config.deviation_exponent);
    let deviation = deviation_ms * half_rate / 1000.0;
    deviation / scale.factor_f32()
}

/// Confidence weight (0 to `2n + 1`) for the interval at `index`
///
/// The caller guarantees `n <= index` and `index + n < intervals.len()`.
pub fn interval_weight(
    peaks: &[usize],
    intervals: &[usize],
    index: usize,
    tolerance: f32,
    neighborhood: usize,
) -> u32 {
    let anchor = peaks[index] as f32;
    let period = intervals[index] as f32;
    let n = neighborhood as isize;

    (-n..=n)
        .filter(|&offset| {
            let neighbour = peaks[(index as isize + offset) as usize] as f32;
            let predicted = anchor + offset as f32 * period;
            (neighbour - predicted).abs() <= tolerance
        })
        .count() as u32
}

/// Score one level's intervals and vote them into the shared histogram
///
/// Only intervals with a full neighbourhood on both sides are scored, i.e.
/// indices in `[n, intervals.len() - n)`.
///
/// # Arguments
///
/// * `histogram` - Histogram shared by every level of one analysis
/// * `peaks` - Stable peak positions of this level
/// * `intervals` - Consecutive differences of `peaks`
/// * `scale` - Level scale
/// * `sample_rate` - Sample rate of the input signal in Hz
/// * `config` - Weighting parameters
pub fn accumulate_level(
    histogram: &mut IntervalHistogram,
    peaks: &[usize],
    intervals: &[usize],
    scale: LevelScale,
    sample_rate: f32,
    config: &AnalysisConfig,
) -> LevelVotes {
    debug_assert_eq!(peaks.len(), intervals.len() + 1);

    let n = config.neighborhood;
    let comparisons = config.comparisons_per_interval() as f32;
    let mut votes = LevelVotes::default();

    for index in n..intervals.len().saturating_sub(n) {
        let interval = intervals[index];
        let tolerance = beat_tolerance(interval, sample_rate, scale, config);
        let weight = interval_weight(peaks, intervals, index, tolerance, n);

        votes.scored += 1;
        if histogram.add_vote(interval * scale.factor, weight as f32 / comparisons) {
            votes.accepted += 1;
        } else {
            votes.dropped += 1;
        }
    }

    log::debug!(
        "Level {}: scored {} intervals, {} voted, {} out of range",
        scale.level,
        votes.scored,
        votes.accepted,
        votes.dropped
    );

    votes
}

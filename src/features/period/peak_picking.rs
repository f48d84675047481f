//! Stable peak detection on wavelet detail coefficients
//!
//! Finds the positions that dominate a sliding window for most of its
//! traversal and derives inter-onset intervals (IOIs) from them.
//!
//! # Algorithm
//!
//! 1. Slide a window of `round(sample_rate / 8 / 2^k)` samples with a hop of
//!    `window / 20`, recording the position of each window's maximum
//! 2. Run-length compress the candidate positions
//! 3. Keep positions whose run covers at least 90% of a hop cycle (18 of 20
//!    windows)
//! 4. IOIs are the consecutive differences of the kept positions
//!
//! A true onset stays the window maximum for every window that contains it,
//! so it repeats ~20 times. Positions picked only because a window happened to
//! contain nothing louder repeat once or twice and are discarded.

use super::LevelScale;
use crate::config::AnalysisConfig;

/// A run of identical window-maximum positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeakRun {
    /// Sample index in the level's detail sequence
    pub position: usize,
    /// Number of consecutive windows that picked this position
    pub count: usize,
}

/// Peaks and intervals extracted from one decomposition level
#[derive(Debug, Clone, Default)]
pub struct LevelPeaks {
    /// Window length used at this level
    pub window_len: usize,
    /// Number of window maxima before compression
    pub candidates: usize,
    /// Stable peak positions, strictly increasing
    pub peaks: Vec<usize>,
    /// Consecutive differences of `peaks`
    pub intervals: Vec<usize>,
}

/// Window length for a decomposition level
///
/// `round((sample_rate / window_divisor) / 2^k)`
pub fn window_length(sample_rate: f32, window_divisor: f32, scale: LevelScale) -> usize {
    let len = (sample_rate / window_divisor) / scale.factor_f32();
    if len.is_finite() && len > 0.0 {
        len.round() as usize
    } else {
        0
    }
}

/// Position of each sliding-window maximum
///
/// Starts at index 1 and advances by `hop` while `start < len - window`.
/// Ties resolve to the first (lowest) index inside the window.
///
/// # Arguments
///
/// * `signal` - Rectified detail coefficients
/// * `window` - Window length in samples
/// * `hop` - Hop length in samples (a zero hop is treated as 1)
///
/// # Returns
///
/// Absolute indices of the window maxima, in sweep order. Empty when the
/// window is zero or not shorter than the signal.
///
/// # Example
///
/// ```
/// use wavelet_tempo::features::period::peak_picking::find_window_peaks;
///
/// let signal = vec![0.0, 0.0, 5.0, 0.0, 0.0, 0.0, 0.0, 0.0];
/// let peaks = find_window_peaks(&signal, 3, 1);
/// assert_eq!(peaks, vec![2, 2, 3, 4]);
/// ```
pub fn find_window_peaks(signal: &[f32], window: usize, hop: usize) -> Vec<usize> {
    if window == 0 || window >= signal.len() {
        return vec![];
    }

    let hop = hop.max(1);
    let end = signal.len() - window;

    (1..end)
        .step_by(hop)
        .map(|start| start + index_of_max(&signal[start..start + window]))
        .collect()
}

/// First index of the maximum value (NaN values are never selected)
fn index_of_max(values: &[f32]) -> usize {
    let mut best = 0;
    let mut best_value = f32::NEG_INFINITY;
    for (i, &v) in values.iter().enumerate() {
        if v > best_value {
            best = i;
            best_value = v;
        }
    }
    best
}

/// Collapse consecutive equal positions into runs
pub fn run_length(positions: &[usize]) -> Vec<PeakRun> {
    let mut runs: Vec<PeakRun> = Vec::new();
    for &position in positions {
        match runs.last_mut() {
            Some(run) if run.position == position => run.count += 1,
            _ => runs.push(PeakRun { position, count: 1 }),
        }
    }
    runs
}

/// Keep the positions of runs at least `min_count` windows long
pub fn stable_peaks(runs: &[PeakRun], min_count: f32) -> Vec<usize> {
    runs.iter()
        .filter(|run| run.count as f32 >= min_count)
        .map(|run| run.position)
        .collect()
}

/// Consecutive differences of a peak list
pub fn inter_onset_intervals(peaks: &[usize]) -> Vec<usize> {
    peaks.windows(2).map(|pair| pair[1] - pair[0]).collect()
}

/// Run the full extraction on one level's rectified detail sequence
///
/// # Arguments
///
/// * `detail` - Rectified (absolute-valued) detail coefficients
/// * `scale` - Scale of the level the coefficients belong to
/// * `sample_rate` - Sample rate of the input signal in Hz
/// * `config` - Peak picking parameters
pub fn extract_level_peaks(
    detail: &[f32],
    scale: LevelScale,
    sample_rate: f32,
    config: &AnalysisConfig,
) -> LevelPeaks {
    let window_len = window_length(sample_rate, config.window_divisor, scale);
    let hop = window_len / config.windows_per_hop_cycle;

    let candidates = find_window_peaks(detail, window_len, hop);
    let runs = run_length(&candidates);
    let peaks = stable_peaks(&runs, config.min_peak_persistence());
    let intervals = inter_onset_intervals(&peaks);

    log::debug!(
        "Level {}: window={}, hop={}, {} candidates, {} runs, {} stable peaks, {} intervals",
        scale.level,
        window_len,
        hop,
        candidates.len(),
        runs.len(),
        peaks.len(),
        intervals.len()
    );

    LevelPeaks {
        window_len,
        candidates: candidates.len(),
        peaks,
        intervals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Impulses of height 1.0 every `period` samples, starting at `offset`
    fn pulse_train(len: usize, period: usize, offset: usize) -> Vec<f32> {
        let mut signal = vec![0.0f32; len];
        let mut i = offset;
        while i < len {
            signal[i] = 1.0;
            i += period;
        }
        signal
    }

    #[test]
    fn test_window_length_per_level() {
        assert_eq!(window_length(44100.0, 8.0, LevelScale::new(0)), 5513);
        assert_eq!(window_length(44100.0, 8.0, LevelScale::new(1)), 2756);
        assert_eq!(window_length(44100.0, 8.0, LevelScale::new(3)), 689);
        assert_eq!(window_length(0.0, 8.0, LevelScale::new(0)), 0);
    }

    #[test]
    fn test_find_window_peaks_first_index_on_ties() {
        let signal = vec![0.0; 10];
        let peaks = find_window_peaks(&signal, 4, 2);
        // All-equal windows pick their own start
        assert_eq!(peaks, vec![1, 3, 5]);
    }

    #[test]
    fn test_find_window_peaks_window_too_long() {
        let signal = vec![1.0; 10];
        assert!(find_window_peaks(&signal, 10, 1).is_empty());
        assert!(find_window_peaks(&signal, 0, 1).is_empty());
    }

    #[test]
    fn test_find_window_peaks_zero_hop() {
        let signal = vec![0.0, 1.0, 0.0, 0.0, 0.0, 0.0];
        let peaks = find_window_peaks(&signal, 2, 0);
        assert_eq!(peaks, vec![1, 2, 3]);
    }

    #[test]
    fn test_window_peaks_are_non_decreasing() {
        let signal: Vec<f32> = (0..2000)
            .map(|i| ((i as f32 * 0.013).sin() * (i as f32 * 0.29).cos()).abs())
            .collect();
        let peaks = find_window_peaks(&signal, 100, 5);
        assert!(peaks.windows(2).all(|p| p[0] <= p[1]));
    }

    #[test]
    fn test_run_length() {
        let runs = run_length(&[3, 3, 3, 7, 9, 9]);
        assert_eq!(
            runs,
            vec![
                PeakRun { position: 3, count: 3 },
                PeakRun { position: 7, count: 1 },
                PeakRun { position: 9, count: 2 },
            ]
        );
        assert!(run_length(&[]).is_empty());
    }

    #[test]
    fn test_stable_peaks_threshold() {
        let runs = vec![
            PeakRun { position: 10, count: 20 },
            PeakRun { position: 30, count: 17 },
            PeakRun { position: 50, count: 18 },
        ];
        assert_eq!(stable_peaks(&runs, 18.0), vec![10, 50]);
    }

    #[test]
    fn test_inter_onset_intervals() {
        assert_eq!(inter_onset_intervals(&[10, 25, 45]), vec![15, 20]);
        assert!(inter_onset_intervals(&[10]).is_empty());
        assert!(inter_onset_intervals(&[]).is_empty());
    }

    #[test]
    fn test_extract_level_peaks_pulse_train() {
        // 8 kHz, level 0: window 1000, hop 50; pulses every 2000 samples
        let config = AnalysisConfig::default();
        let signal = pulse_train(40_000, 2000, 1500);
        let level = extract_level_peaks(&signal, LevelScale::new(0), 8000.0, &config);

        assert_eq!(level.window_len, 1000);
        assert!(level.peaks.len() >= 15, "Expected stable pulses, got {:?}", level.peaks);
        assert!(
            level.intervals.iter().all(|&ioi| ioi == 2000),
            "Intervals should match the pulse period: {:?}",
            level.intervals
        );
    }

    #[test]
    fn test_extract_level_peaks_silence() {
        let config = AnalysisConfig::default();
        let signal = vec![0.0f32; 40_000];
        let level = extract_level_peaks(&signal, LevelScale::new(0), 8000.0, &config);

        assert!(level.candidates > 0);
        assert!(level.peaks.is_empty(), "Silence has no stable peaks");
        assert!(level.intervals.is_empty());
    }
}

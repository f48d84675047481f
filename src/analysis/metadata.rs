//! Analysis metadata structures

use crate::features::period::LevelSummary;
use serde::{Deserialize, Serialize};

/// Analysis metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Audio duration in seconds
    pub duration_seconds: f32,

    /// Sample rate in Hz
    pub sample_rate: f32,

    /// Processing time in milliseconds
    pub processing_time_ms: f32,

    /// Algorithm version
    pub algorithm_version: String,

    /// Smoothed histogram bin the BPM was read from
    pub peak_bin: usize,

    /// Per-level decomposition diagnostics
    pub levels: Vec<LevelSummary>,
}

impl Default for AnalysisMetadata {
    fn default() -> Self {
        Self {
            duration_seconds: 0.0,
            sample_rate: 0.0,
            processing_time_ms: 0.0,
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            peak_bin: 0,
            levels: vec![],
        }
    }
}

impl AnalysisMetadata {
    /// Number of levels that voted into the histogram
    pub fn contributing_levels(&self) -> usize {
        self.levels.iter().filter(|l| !l.skipped && l.votes > 0).count()
    }
}

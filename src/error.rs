//! Error types for tempo estimation

use std::fmt;

/// Errors that can occur during tempo estimation
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Invalid input parameters or configuration
    InvalidInput(String),

    /// No decomposition level produced any interval votes, so there is no
    /// histogram peak to report
    NoTempoFound(String),

    /// Numerical error (non-finite intermediate or output values)
    NumericalError(String),
}

impl AnalysisError {
    /// Returns true if the error is caused by the caller's input rather than by
    /// the content of the audio
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, AnalysisError::InvalidInput(_))
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AnalysisError::NoTempoFound(msg) => write!(f, "No confident tempo found: {}", msg),
            AnalysisError::NumericalError(msg) => write!(f, "Numerical error: {}", msg),
        }
    }
}

impl std::error::Error for AnalysisError {}

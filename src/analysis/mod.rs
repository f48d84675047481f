//! Analysis result types
//!
//! - BPM result and debug histograms
//! - Metadata and per-level diagnostics

pub mod metadata;
pub mod result;

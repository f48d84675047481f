//! Buffer-level utilities
//!
//! - Dynamic range (RMS energy)

pub mod dynamic_range;

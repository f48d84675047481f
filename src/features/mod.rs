//! Feature extraction modules
//!
//! - Wavelet decomposition (Daubechies filter bank)
//! - Period estimation (peak picking, interval histogram, smoothing)

pub mod period;
pub mod wavelet;

//! Discrete wavelet transform
//!
//! A single-level Daubechies filter bank, iterated by the period estimator to
//! build a multi-resolution pyramid: each level decomposes the previous level's
//! approximation, and level `k` runs at a time scale `2^k` coarser than the
//! input.

pub mod daubechies;
pub mod filter_bank;

pub use daubechies::Daubechies;
pub use filter_bank::{min_input_len, Decomposition, FilterBank};

//! Daubechies wavelet families
//!
//! Canonical (scaling) filter coefficients for db1-db5. The canonical vector is
//! the low-pass decomposition filter; the matching high-pass filter is derived
//! from it as a quadrature mirror (see [`Daubechies::mirror_coefficients`]).

use crate::error::AnalysisError;

const DB1: [f32; 2] = [0.707_106_781_186_547_5, 0.707_106_781_186_547_5];

const DB2: [f32; 4] = [
    0.482_962_913_144_534_1,
    0.836_516_303_737_807_9,
    0.224_143_868_042_013_4,
    -0.129_409_522_551_260_4,
];

const DB3: [f32; 6] = [
    0.332_670_552_950_082_6,
    0.806_891_509_311_092_6,
    0.459_877_502_118_491_6,
    -0.135_011_020_010_254_6,
    -0.085_441_273_882_026_66,
    0.035_226_291_885_709_54,
];

const DB4: [f32; 8] = [
    0.230_377_813_308_896_5,
    0.714_846_570_552_915_6,
    0.630_880_767_929_858_9,
    -0.027_983_769_416_859_85,
    -0.187_034_811_719_093_1,
    0.030_841_381_835_560_76,
    0.032_883_011_666_885_2,
    -0.010_597_401_785_069_03,
];

const DB5: [f32; 10] = [
    0.160_102_397_974_192_9,
    0.603_829_269_797_189_7,
    0.724_308_528_437_772_9,
    0.138_428_145_901_320_7,
    -0.242_294_887_066_382,
    -0.032_244_869_584_638_37,
    0.077_571_493_840_045_71,
    -0.006_241_490_212_798_274,
    -0.012_580_751_999_081_99,
    0.003_335_725_285_473_771,
];

/// Daubechies wavelet family, ordered by increasing filter support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Daubechies {
    /// db1 (Haar), 2 taps
    Db1,
    /// db2, 4 taps
    #[default]
    Db2,
    /// db3, 6 taps
    Db3,
    /// db4, 8 taps
    Db4,
    /// db5, 10 taps
    Db5,
}

impl Daubechies {
    /// All supported families, shortest support first
    pub const ALL: [Daubechies; 5] = [
        Daubechies::Db1,
        Daubechies::Db2,
        Daubechies::Db3,
        Daubechies::Db4,
        Daubechies::Db5,
    ];

    /// Select a family by its order (1-5)
    ///
    /// # Example
    ///
    /// ```
    /// use wavelet_tempo::features::wavelet::Daubechies;
    ///
    /// assert_eq!(Daubechies::from_index(2)?, Daubechies::Db2);
    /// assert!(Daubechies::from_index(6).is_err());
    /// # Ok::<(), wavelet_tempo::AnalysisError>(())
    /// ```
    pub fn from_index(index: u8) -> Result<Self, AnalysisError> {
        match index {
            1 => Ok(Daubechies::Db1),
            2 => Ok(Daubechies::Db2),
            3 => Ok(Daubechies::Db3),
            4 => Ok(Daubechies::Db4),
            5 => Ok(Daubechies::Db5),
            _ => Err(AnalysisError::InvalidInput(format!(
                "Unsupported Daubechies order: {} (expected 1-5)",
                index
            ))),
        }
    }

    /// Order of the family (1-5)
    pub fn index(&self) -> u8 {
        match self {
            Daubechies::Db1 => 1,
            Daubechies::Db2 => 2,
            Daubechies::Db3 => 3,
            Daubechies::Db4 => 4,
            Daubechies::Db5 => 5,
        }
    }

    /// Canonical scaling coefficients
    pub fn coefficients(&self) -> &'static [f32] {
        match self {
            Daubechies::Db1 => &DB1,
            Daubechies::Db2 => &DB2,
            Daubechies::Db3 => &DB3,
            Daubechies::Db4 => &DB4,
            Daubechies::Db5 => &DB5,
        }
    }

    /// Filter length in taps
    pub fn filter_len(&self) -> usize {
        self.coefficients().len()
    }

    /// Quadrature-mirror coefficients
    ///
    /// The canonical vector reversed, with every odd-indexed element of the
    /// reversed vector negated.
    pub fn mirror_coefficients(&self) -> Vec<f32> {
        self.coefficients()
            .iter()
            .rev()
            .enumerate()
            .map(|(i, &c)| if i % 2 != 0 { -c } else { c })
            .collect()
    }
}

//! Result types shared across the tablescope crates.

pub mod correlation;
pub mod prediction;
pub mod statistics;

pub use correlation::{
    ColumnPair, CorrelationClassification, CorrelationMatrix, MAX_WEAK_PAIRS,
    STRONG_NEGATIVE_THRESHOLD, STRONG_POSITIVE_THRESHOLD, WEAK_THRESHOLD,
};
pub use prediction::{FeatureValue, Prediction};
pub use statistics::{
    ColumnStatistics, NORMALITY_ALPHA, NORMALITY_MAX_SAMPLES, Quartiles, TUKEY_FENCE,
};

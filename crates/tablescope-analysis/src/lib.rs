//! Statistical analyses over the numeric columns of a table.
//!
//! - [`correlate`]: pairwise Pearson matrix
//! - [`describe`]: per-column distribution statistics with a normality test
//!   and Tukey outlier counts
//! - [`classify`]: strong positive / strong negative / weak correlation pairs
//!
//! None of the functions mutate their input.

pub mod correlation;
pub mod describe;
pub mod descriptive;
pub mod error;
pub mod normality;

pub use correlation::{classify, correlate, correlate_columns, pearson};
pub use describe::{MIN_DESCRIBE_VALUES, describe, describe_column};
pub use descriptive::{HistogramBin, histogram};
pub use error::{AnalysisError, Result};
pub use normality::{NormalityTest, shapiro_wilk};

use serde::{Deserialize, Serialize};

/// Multiplier applied to the IQR to place the outlier fences.
pub const TUKEY_FENCE: f64 = 1.5;
/// Significance level of the normality test.
pub const NORMALITY_ALPHA: f64 = 0.05;
/// Largest sample the normality test runs on.
pub const NORMALITY_MAX_SAMPLES: usize = 5000;

/// First quartile, median and third quartile of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

impl Quartiles {
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    pub fn lower_fence(&self) -> f64 {
        self.q1 - TUKEY_FENCE * self.iqr()
    }

    pub fn upper_fence(&self) -> f64 {
        self.q3 + TUKEY_FENCE * self.iqr()
    }

    /// True when `value` lies strictly outside the Tukey fences.
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower_fence() || value > self.upper_fence()
    }
}

/// Distribution summary for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStatistics {
    pub column: String,
    /// Number of non-missing values.
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation.
    pub std: f64,
    /// Bias-corrected sample skewness; undefined below three values.
    pub skewness: Option<f64>,
    /// Bias-corrected excess kurtosis; undefined below four values.
    pub kurtosis: Option<f64>,
    /// Shapiro-Wilk p-value, absent when the test was not run.
    pub normality_p_value: Option<f64>,
    pub is_normal: bool,
    pub outliers: usize,
    pub outlier_percent: f64,
    pub min: f64,
    pub max: f64,
    pub quartiles: Quartiles,
}

use serde::{Deserialize, Serialize};

/// Coefficients above this value are strong positive correlations.
pub const STRONG_POSITIVE_THRESHOLD: f64 = 0.8;
/// Coefficients below this value are strong negative correlations.
pub const STRONG_NEGATIVE_THRESHOLD: f64 = -0.5;
/// Coefficients whose magnitude is below this value are weak.
pub const WEAK_THRESHOLD: f64 = 0.2;
/// Maximum number of weak pairs kept in a classification.
pub const MAX_WEAK_PAIRS: usize = 5;

/// Square matrix of Pearson coefficients over the numeric columns of a table.
///
/// `None` marks an undefined coefficient (a constant column, or fewer than
/// two complete observations for the pair).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Builds a matrix from column names and row-major values.
    ///
    /// Returns `None` when `values` is not `columns.len()` square.
    pub fn new(columns: Vec<String>, values: Vec<Vec<Option<f64>>>) -> Option<Self> {
        let n = columns.len();
        if values.len() != n || values.iter().any(|row| row.len() != n) {
            return None;
        }
        Some(Self { columns, values })
    }

    /// Builds a matrix by evaluating `value(i, j)` for every cell.
    pub fn from_fn(
        columns: Vec<String>,
        mut value: impl FnMut(usize, usize) -> Option<f64>,
    ) -> Self {
        let n = columns.len();
        let values = (0..n)
            .map(|i| (0..n).map(|j| value(i, j)).collect())
            .collect();
        Self { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Coefficient at row `i`, column `j`.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get(i).and_then(|row| row.get(j)).copied().flatten()
    }

    /// Coefficient for a pair of column names.
    pub fn get_by_name(&self, first: &str, second: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == first)?;
        let j = self.columns.iter().position(|c| c == second)?;
        self.get(i, j)
    }

    pub fn rows(&self) -> &[Vec<Option<f64>>] {
        &self.values
    }
}

/// A pair of columns with their correlation coefficient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnPair {
    pub first: String,
    pub second: String,
    pub r: f64,
}

/// Correlation pairs grouped by strength.
///
/// Coefficients in (-0.5, -0.2], [0.2, 0.8] belong to no group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationClassification {
    pub strong_positive: Vec<ColumnPair>,
    pub strong_negative: Vec<ColumnPair>,
    /// First [`MAX_WEAK_PAIRS`] weak pairs in column order.
    pub weak: Vec<ColumnPair>,
    /// Number of weak pairs before truncation.
    pub weak_total: usize,
}

impl CorrelationClassification {
    /// True when no pair fell into any group.
    pub fn is_empty(&self) -> bool {
        self.strong_positive.is_empty() && self.strong_negative.is_empty() && self.weak.is_empty()
    }
}

use thiserror::Error;

/// Errors raised while fitting or evaluating a linear model.
#[derive(Debug, Error)]
pub enum PredictError {
    // === Input Errors ===
    /// The target column index is outside the table.
    #[error("invalid target column {index} (table has {columns} columns)")]
    InvalidTargetColumn { index: usize, columns: usize },

    /// The number of supplied feature values differs from the feature columns.
    #[error("expected {expected} feature values, got {found}")]
    FeatureCountMismatch { expected: usize, found: usize },

    /// A feature token is not a number.
    #[error("feature value '{token}' is not a number")]
    NonNumericFeatureInput { token: String },

    // === Data Errors ===
    /// A participating column is not numeric.
    #[error("column '{column}' is not numeric")]
    NonNumericColumn { column: String },

    /// No complete row remains once missing values are dropped.
    #[error("no complete rows to fit the model")]
    InsufficientRows,

    /// The least-squares decomposition did not converge.
    #[error("least-squares solve failed: {message}")]
    Solve { message: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for PredictError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for prediction operations.
pub type Result<T> = std::result::Result<T, PredictError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = PredictError::FeatureCountMismatch {
            expected: 2,
            found: 3,
        };
        assert_eq!(err.to_string(), "expected 2 feature values, got 3");
        let err = PredictError::NonNumericFeatureInput {
            token: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "feature value 'abc' is not a number");
    }
}

use thiserror::Error;

/// Errors raised by the table analyses.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The analysis needs more numeric columns than the table has.
    #[error("need at least {required} numeric columns, found {found}")]
    InsufficientColumns { required: usize, found: usize },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for AnalysisError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

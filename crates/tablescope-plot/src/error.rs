use thiserror::Error;

use tablescope_analysis::AnalysisError;

/// Errors raised while rendering plots.
#[derive(Debug, Error)]
pub enum PlotError {
    /// The table has no numeric column to plot.
    #[error("no numeric columns to plot")]
    NoNumericColumns,

    /// The plot needs more numeric columns than the table has.
    #[error("need at least {required} numeric columns, found {found}")]
    InsufficientColumns { required: usize, found: usize },

    /// The plot kind name is not recognized.
    #[error("unknown plot kind '{name}' (expected hist, box or scatter)")]
    UnknownPlotKind { name: String },

    /// The drawing backend failed.
    #[error("failed to render plot: {message}")]
    Render { message: String },

    /// The rendered pixels could not be encoded as PNG.
    #[error("failed to encode PNG: {message}")]
    Encode { message: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for PlotError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

impl From<AnalysisError> for PlotError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::InsufficientColumns { required, found } => {
                Self::InsufficientColumns { required, found }
            }
            AnalysisError::DataFrame { message } => Self::DataFrame { message },
        }
    }
}

/// Maps a plotters drawing error into [`PlotError::Render`].
pub(crate) fn render_error(err: impl std::fmt::Display) -> PlotError {
    PlotError::Render {
        message: err.to_string(),
    }
}

/// Result type for plot operations.
pub type Result<T> = std::result::Result<T, PlotError>;

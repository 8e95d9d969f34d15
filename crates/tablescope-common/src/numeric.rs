//! Numeric column extraction.
//!
//! Every analysis in the workspace works on the numeric subset of a frame:
//! integer and floating point columns, in frame order. Booleans and text are
//! opaque. Nulls and NaN are both reported as missing.

use polars::prelude::*;

/// A numeric column pulled out of a frame as `f64` values.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericColumn {
    pub name: String,
    /// One entry per row; `None` marks a missing value.
    pub values: Vec<Option<f64>>,
}

impl NumericColumn {
    /// Non-missing values in row order.
    pub fn present(&self) -> Vec<f64> {
        self.values.iter().flatten().copied().collect()
    }

    /// Number of non-missing values.
    pub fn present_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

/// Returns true for integer and floating point dtypes.
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Names of the numeric columns, in frame order.
pub fn numeric_column_names(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|column| is_numeric_dtype(column.dtype()))
        .map(|column| column.name().to_string())
        .collect()
}

/// Reads a column as `f64` values. NaN is mapped to `None`.
///
/// # Errors
///
/// Returns the Polars error when the column cannot be cast to `Float64`.
pub fn column_f64(column: &Column) -> PolarsResult<Vec<Option<f64>>> {
    let cast = column.cast(&DataType::Float64)?;
    let values = cast.f64()?;
    Ok(values
        .into_iter()
        .map(|value| value.filter(|v| !v.is_nan()))
        .collect())
}

/// Extracts every numeric column of the frame, in frame order.
///
/// # Errors
///
/// Returns the Polars error when a numeric column cannot be cast.
pub fn numeric_columns(df: &DataFrame) -> PolarsResult<Vec<NumericColumn>> {
    df.get_columns()
        .iter()
        .filter(|column| is_numeric_dtype(column.dtype()))
        .map(|column| {
            Ok(NumericColumn {
                name: column.name().to_string(),
                values: column_f64(column)?,
            })
        })
        .collect()
}

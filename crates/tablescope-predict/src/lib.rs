//! Single-point linear regression over a table.
//!
//! [`fit_and_predict`] treats one column as the target and every other
//! column, in table order, as a feature. The model is refit on each call
//! and never cached.

pub mod error;
mod features;
mod ols;

use std::time::Instant;

use polars::prelude::{Column, DataFrame};
use tablescope_common::{column_f64, is_numeric_dtype};
use tablescope_model::{FeatureValue, Prediction};
use tracing::{debug, info};

pub use error::{PredictError, Result};
pub use features::parse_features;

fn require_numeric(column: &Column) -> Result<Vec<Option<f64>>> {
    if !is_numeric_dtype(column.dtype()) {
        return Err(PredictError::NonNumericColumn {
            column: column.name().to_string(),
        });
    }
    Ok(column_f64(column)?)
}

/// Fits an ordinary least-squares model with intercept that maps all
/// columns except `target_index` onto the target, then evaluates it at
/// `features`.
///
/// Rows with a missing value in any column are dropped before fitting.
///
/// # Errors
///
/// - [`PredictError::InvalidTargetColumn`] when `target_index` is out of range
/// - [`PredictError::FeatureCountMismatch`] when `features` does not have one
///   value per feature column
/// - [`PredictError::NonNumericColumn`] when any column is not numeric
/// - [`PredictError::InsufficientRows`] when no complete row remains
pub fn fit_and_predict(df: &DataFrame, target_index: usize, features: &[f64]) -> Result<Prediction> {
    let started = Instant::now();
    let columns = df.get_columns();
    let Some(target) = columns.get(target_index) else {
        return Err(PredictError::InvalidTargetColumn {
            index: target_index,
            columns: columns.len(),
        });
    };
    let feature_columns: Vec<&Column> = columns
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != target_index)
        .map(|(_, column)| column)
        .collect();
    if features.len() != feature_columns.len() {
        return Err(PredictError::FeatureCountMismatch {
            expected: feature_columns.len(),
            found: features.len(),
        });
    }

    let target_values = require_numeric(target)?;
    let feature_values = feature_columns
        .iter()
        .map(|column| require_numeric(column))
        .collect::<Result<Vec<_>>>()?;

    let complete: Vec<usize> = (0..df.height())
        .filter(|&i| {
            target_values[i].is_some() && feature_values.iter().all(|column| column[i].is_some())
        })
        .collect();
    if complete.is_empty() {
        return Err(PredictError::InsufficientRows);
    }
    debug!(
        rows = df.height(),
        complete = complete.len(),
        "dropped incomplete rows"
    );

    let y: Vec<f64> = complete.iter().filter_map(|&i| target_values[i]).collect();
    let x: Vec<Vec<f64>> = feature_values
        .iter()
        .map(|column| complete.iter().filter_map(|&i| column[i]).collect())
        .collect();
    let fit = ols::fit(&y, &x)?;
    let value = fit.predict(features);

    info!(
        target = %target.name(),
        features = feature_columns.len(),
        rows_used = complete.len(),
        r_squared = fit.r_squared,
        duration_ms = started.elapsed().as_millis() as u64,
        "fitted linear model"
    );

    Ok(Prediction {
        target: target.name().to_string(),
        features: feature_columns
            .iter()
            .zip(features)
            .map(|(column, value)| FeatureValue {
                name: column.name().to_string(),
                value: *value,
            })
            .collect(),
        value,
        coefficients: fit.coefficients,
        intercept: fit.intercept,
        r_squared: fit.r_squared,
        rows_used: complete.len(),
    })
}

//! Per-column distribution statistics.

use polars::prelude::DataFrame;
use tablescope_common::{NumericColumn, numeric_columns};
use tablescope_model::{ColumnStatistics, NORMALITY_ALPHA};
use tracing::{debug, info_span};

use crate::descriptive::{
    count_outliers, excess_kurtosis, mean, min_max, population_std, quartiles, skewness,
};
use crate::error::Result;
use crate::normality::shapiro_wilk;

/// Fewest non-missing values a column needs to be described.
pub const MIN_DESCRIBE_VALUES: usize = 2;

/// Statistics for one column, or `None` when it has fewer than two
/// non-missing values.
pub fn describe_column(column: &NumericColumn) -> Option<ColumnStatistics> {
    let values = column.present();
    let count = values.len();
    if count < MIN_DESCRIBE_VALUES {
        return None;
    }
    let quartiles = quartiles(&values)?;
    let (min, max) = min_max(&values)?;
    let normality = shapiro_wilk(&values);
    let normality_p_value = normality.map(|test| test.p_value);
    let outliers = count_outliers(&values, &quartiles);
    Some(ColumnStatistics {
        column: column.name.clone(),
        count,
        mean: mean(&values)?,
        median: quartiles.median,
        std: population_std(&values)?,
        skewness: skewness(&values),
        kurtosis: excess_kurtosis(&values),
        normality_p_value,
        is_normal: normality_p_value.is_some_and(|p| p > NORMALITY_ALPHA),
        outliers,
        outlier_percent: outliers as f64 / count as f64 * 100.0,
        min,
        max,
        quartiles,
    })
}

/// Describes every numeric column of `df` with at least two values, in
/// column order.
pub fn describe(df: &DataFrame) -> Result<Vec<ColumnStatistics>> {
    let span = info_span!("describe", rows = df.height());
    let _guard = span.enter();
    let columns = numeric_columns(df)?;
    let described: Vec<ColumnStatistics> = columns.iter().filter_map(describe_column).collect();
    debug!(
        numeric_columns = columns.len(),
        described = described.len(),
        "described columns"
    );
    Ok(described)
}

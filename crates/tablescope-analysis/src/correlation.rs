//! Pearson correlation and strength classification.

use std::cmp::Ordering;

use polars::prelude::DataFrame;
use tablescope_common::{NumericColumn, numeric_columns};
use tablescope_model::{
    ColumnPair, CorrelationClassification, CorrelationMatrix, MAX_WEAK_PAIRS,
    STRONG_NEGATIVE_THRESHOLD, STRONG_POSITIVE_THRESHOLD, WEAK_THRESHOLD,
};
use tracing::debug;

use crate::error::{AnalysisError, Result};

/// Pearson coefficient over the rows where both values are present.
///
/// `None` when fewer than two complete pairs remain or either side is
/// constant over those pairs.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some((sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0))
}

fn self_correlation(column: &NumericColumn) -> Option<f64> {
    let present = column.present();
    let varies = present.windows(2).any(|w| w[0] != w[1]);
    (present.len() >= 2 && varies).then_some(1.0)
}

/// Correlation matrix of already-extracted numeric columns.
///
/// Each pair is evaluated with the lower column index first, so the matrix
/// is exactly symmetric.
pub fn correlate_columns(columns: &[NumericColumn]) -> CorrelationMatrix {
    let names = columns.iter().map(|c| c.name.clone()).collect();
    CorrelationMatrix::from_fn(names, |i, j| match i.cmp(&j) {
        Ordering::Equal => self_correlation(&columns[i]),
        Ordering::Less => pearson(&columns[i].values, &columns[j].values),
        Ordering::Greater => pearson(&columns[j].values, &columns[i].values),
    })
}

/// Pairwise Pearson correlation of the numeric columns of `df`.
///
/// # Errors
///
/// [`AnalysisError::InsufficientColumns`] when fewer than two numeric
/// columns exist.
pub fn correlate(df: &DataFrame) -> Result<CorrelationMatrix> {
    let columns = numeric_columns(df)?;
    if columns.len() < 2 {
        return Err(AnalysisError::InsufficientColumns {
            required: 2,
            found: columns.len(),
        });
    }
    let matrix = correlate_columns(&columns);
    debug!(columns = matrix.len(), rows = df.height(), "computed correlation matrix");
    Ok(matrix)
}

/// Buckets every unordered column pair by coefficient.
///
/// Pairs are visited once in column order. Strong negative (`r < -0.5`) is
/// checked first, then strong positive (`r > 0.8`), then weak (`|r| < 0.2`).
/// Undefined coefficients and the gaps between buckets are not reported.
pub fn classify(matrix: &CorrelationMatrix) -> CorrelationClassification {
    let mut result = CorrelationClassification::default();
    let columns = matrix.columns();
    for i in 0..columns.len() {
        for j in (i + 1)..columns.len() {
            let Some(r) = matrix.get(i, j) else {
                continue;
            };
            let pair = ColumnPair {
                first: columns[i].clone(),
                second: columns[j].clone(),
                r,
            };
            if r < STRONG_NEGATIVE_THRESHOLD {
                result.strong_negative.push(pair);
            } else if r > STRONG_POSITIVE_THRESHOLD {
                result.strong_positive.push(pair);
            } else if r.abs() < WEAK_THRESHOLD {
                result.weak_total += 1;
                if result.weak.len() < MAX_WEAK_PAIRS {
                    result.weak.push(pair);
                }
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, values: &[f64]) -> NumericColumn {
        NumericColumn {
            name: name.to_string(),
            values: values.iter().copied().map(Some).collect(),
        }
    }

    fn matrix_from(pairs: &[(usize, usize, f64)], k: usize) -> CorrelationMatrix {
        let names = (0..k).map(|i| format!("c{i}")).collect();
        CorrelationMatrix::from_fn(names, |i, j| {
            if i == j {
                return Some(1.0);
            }
            pairs
                .iter()
                .find(|&&(a, b, _)| (a, b) == (i, j) || (a, b) == (j, i))
                .map(|&(_, _, r)| r)
        })
    }

    #[test]
    fn test_pearson_perfect() {
        let x = [Some(1.0), Some(2.0), Some(3.0)];
        let y = [Some(2.0), Some(4.0), Some(6.0)];
        let z = [Some(3.0), Some(2.0), Some(1.0)];
        assert!((pearson(&x, &y).unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson(&x, &z).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_pairwise_complete() {
        let x = [Some(1.0), None, Some(3.0), Some(4.0)];
        let y = [Some(1.0), Some(100.0), Some(3.0), None];
        assert!((pearson(&x, &y).unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(pearson(&[Some(1.0)], &[Some(2.0)]), None);
        assert_eq!(pearson(&x, &[Some(5.0); 4]), None);
    }

    #[test]
    fn test_constant_column_has_undefined_diagonal() {
        let matrix = correlate_columns(&[column("a", &[1.0, 2.0]), column("b", &[3.0, 3.0])]);
        assert_eq!(matrix.get(0, 0), Some(1.0));
        assert_eq!(matrix.get(1, 1), None);
        assert_eq!(matrix.get(0, 1), None);
        assert!(classify(&matrix).is_empty());
    }

    #[test]
    fn test_classify_buckets() {
        let matrix = matrix_from(&[(0, 1, 1.0), (0, 2, -1.0), (1, 2, 0.0), (0, 3, 0.5)], 4);
        let result = classify(&matrix);
        assert_eq!(result.strong_positive.len(), 1);
        assert_eq!(result.strong_positive[0].second, "c1");
        assert_eq!(result.strong_negative.len(), 1);
        assert_eq!(result.strong_negative[0].second, "c2");
        assert_eq!(result.weak.len(), 1);
        assert_eq!((result.weak[0].first.as_str(), result.weak[0].second.as_str()), ("c1", "c2"));
        let all = [&result.strong_positive, &result.strong_negative, &result.weak];
        assert!(all.iter().flat_map(|b| b.iter()).all(|p| p.r != 0.5));
    }

    #[test]
    fn test_boundaries_fall_in_gaps() {
        let matrix = matrix_from(&[(0, 1, 0.8), (0, 2, -0.5), (1, 2, 0.2)], 3);
        let result = classify(&matrix);
        assert!(result.is_empty());
    }

    #[test]
    fn test_weak_list_is_truncated() {
        let k = 6;
        let mut pairs = Vec::new();
        for i in 0..k {
            for j in (i + 1)..k {
                pairs.push((i, j, 0.05));
            }
        }
        let result = classify(&matrix_from(&pairs, k));
        assert_eq!(result.weak.len(), MAX_WEAK_PAIRS);
        assert_eq!(result.weak_total, 15);
        assert_eq!(result.weak[0].first, "c0");
        assert_eq!(result.weak[0].second, "c1");
    }
}

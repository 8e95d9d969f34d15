//! Minimum-norm ordinary least squares with an intercept.
//!
//! The features are centered, so the intercept drops out of the system.
//! The slope comes from a thin SVD of the centered design, inverted on its
//! numerically non-zero singular values only, which yields the
//! minimum-norm solution when feature columns are collinear.

use faer::{Col, Mat};

use crate::error::{PredictError, Result};

const RELATIVE_RANK_TOLERANCE: f64 = 1e-10;

/// Coefficients of a fitted model.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LinearFit {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    pub r_squared: f64,
}

impl LinearFit {
    pub fn predict(&self, features: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(b, x)| b * x)
                .sum::<f64>()
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Fits `y ≈ intercept + Σ βⱼ·xⱼ`; `x` holds one vector per feature, each
/// as long as `y`. `y` must not be empty.
pub(crate) fn fit(y: &[f64], x: &[Vec<f64>]) -> Result<LinearFit> {
    let (n, p) = (y.len(), x.len());
    let y_mean = mean(y);
    let x_means: Vec<f64> = x.iter().map(|column| mean(column)).collect();

    let coefficients = if p == 0 {
        Vec::new()
    } else {
        let design = Mat::from_fn(n, p, |i, j| x[j][i] - x_means[j]);
        let response = Col::from_fn(n, |i| y[i] - y_mean);
        minimum_norm_solve(&design, &response)?
    };
    let intercept = y_mean - dot(&coefficients, &x_means);

    let mut fit = LinearFit {
        coefficients,
        intercept,
        r_squared: 0.0,
    };
    let (ss_res, ss_tot) = (0..n).fold((0.0, 0.0), |(res, tot), i| {
        let row: Vec<f64> = x.iter().map(|column| column[i]).collect();
        let residual = y[i] - fit.predict(&row);
        (res + residual * residual, tot + (y[i] - y_mean).powi(2))
    });
    fit.r_squared = if ss_tot > 0.0 { 1.0 - ss_res / ss_tot } else { 1.0 };
    Ok(fit)
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// `β = V Σ⁺ Uᵀ b`, dropping singular values below the rank tolerance.
fn minimum_norm_solve(a: &Mat<f64>, b: &Col<f64>) -> Result<Vec<f64>> {
    let svd = a.as_ref().thin_svd().map_err(|e| PredictError::Solve {
        message: format!("{e:?}"),
    })?;
    let (u, v) = (svd.U(), svd.V());
    let singular: Vec<f64> = svd.S().column_vector().iter().copied().collect();
    let largest = singular.iter().copied().fold(0.0_f64, f64::max);
    let tolerance = largest * RELATIVE_RANK_TOLERANCE;

    let mut solution = vec![0.0; a.ncols()];
    for (k, sigma) in singular.iter().enumerate() {
        if *sigma <= tolerance {
            continue;
        }
        let projection = (0..a.nrows()).map(|i| u[(i, k)] * b[i]).sum::<f64>() / sigma;
        for (j, s) in solution.iter_mut().enumerate() {
            *s += projection * v[(j, k)];
        }
    }
    Ok(solution)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-8, "{a} != {b}");
    }

    #[test]
    fn recovers_exact_plane() {
        let x1 = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let x2 = vec![2.0, 1.0, 0.0, 3.0, 7.0];
        let y: Vec<f64> = x1
            .iter()
            .zip(&x2)
            .map(|(a, b)| 3.0 + 2.0 * a - 0.5 * b)
            .collect();
        let fit = fit(&y, &[x1, x2]).unwrap();
        assert_close(fit.intercept, 3.0);
        assert_close(fit.coefficients[0], 2.0);
        assert_close(fit.coefficients[1], -0.5);
        assert_close(fit.r_squared, 1.0);
    }

    #[test]
    fn collinear_features_get_minimum_norm_weights() {
        let x1: Vec<f64> = (1..=10).map(f64::from).collect();
        let x2: Vec<f64> = x1.iter().map(|v| 2.0 * v).collect();
        let y: Vec<f64> = x1.iter().map(|v| 3.0 * v).collect();
        let fit = fit(&y, &[x1, x2]).unwrap();
        // 3 = b1 + 2 b2 with the smallest |b| gives (0.6, 1.2).
        assert_close(fit.coefficients[0], 0.6);
        assert_close(fit.coefficients[1], 1.2);
        assert_close(fit.intercept, 0.0);
        assert_close(fit.predict(&[5.0, 10.0]), 15.0);
    }

    #[test]
    fn no_features_predicts_the_mean() {
        let fit = fit(&[1.0, 2.0, 6.0], &[]).unwrap();
        assert!(fit.coefficients.is_empty());
        assert_close(fit.predict(&[]), 3.0);
        assert_close(fit.r_squared, 0.0);
    }

    #[test]
    fn constant_feature_is_ignored() {
        let x1 = vec![4.0, 4.0, 4.0, 4.0];
        let x2 = vec![1.0, 2.0, 3.0, 4.0];
        let y = vec![2.0, 4.0, 6.0, 8.0];
        let fit = fit(&y, &[x1, x2]).unwrap();
        assert_close(fit.coefficients[0], 0.0);
        assert_close(fit.coefficients[1], 2.0);
        assert_close(fit.intercept, 0.0);
    }
}

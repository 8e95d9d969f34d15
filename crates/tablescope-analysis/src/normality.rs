//! Shapiro-Wilk normality test.
//!
//! Coefficients and the p-value use Royston's (1992/1995) approximations,
//! valid for 3 <= n <= 5000.

use statrs::distribution::{ContinuousCDF, Normal};
use tablescope_model::NORMALITY_MAX_SAMPLES;

use crate::descriptive::{is_constant, mean, sorted};

/// Smallest sample the test accepts.
pub const NORMALITY_MIN_SAMPLES: usize = 3;

/// W statistic and p-value of a Shapiro-Wilk test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalityTest {
    pub statistic: f64,
    pub p_value: f64,
}

fn poly(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Runs the test on the given values.
///
/// Returns `None` for samples outside 3..=5000 values and for constant
/// samples, where W is undefined.
pub fn shapiro_wilk(values: &[f64]) -> Option<NormalityTest> {
    let n = values.len();
    if !(NORMALITY_MIN_SAMPLES..=NORMALITY_MAX_SAMPLES).contains(&n) || is_constant(values) {
        return None;
    }
    let standard = Normal::new(0.0, 1.0).ok()?;
    let x = sorted(values);
    let nf = n as f64;

    let weights = if n == 3 {
        let a = std::f64::consts::FRAC_1_SQRT_2;
        vec![-a, 0.0, a]
    } else {
        let m: Vec<f64> = (1..=n)
            .map(|i| standard.inverse_cdf((i as f64 - 0.375) / (nf + 0.25)))
            .collect();
        let m_sq: f64 = m.iter().map(|v| v * v).sum();
        let u = 1.0 / nf.sqrt();
        let last = m[n - 1];
        let a_n = poly(
            &[last / m_sq.sqrt(), 0.221_157, -0.147_981, -2.071_190, 4.434_685, -2.706_056],
            u,
        );
        let mut a = vec![0.0; n];
        if n > 5 {
            let second = m[n - 2];
            let a_n1 = poly(
                &[second / m_sq.sqrt(), 0.042_981, -0.293_762, -1.752_461, 5.682_633, -3.582_633],
                u,
            );
            let phi = (m_sq - 2.0 * last * last - 2.0 * second * second)
                / (1.0 - 2.0 * a_n * a_n - 2.0 * a_n1 * a_n1);
            for i in 2..n - 2 {
                a[i] = m[i] / phi.sqrt();
            }
            a[n - 2] = a_n1;
            a[1] = -a_n1;
        } else {
            let phi = (m_sq - 2.0 * last * last) / (1.0 - 2.0 * a_n * a_n);
            for i in 1..n - 1 {
                a[i] = m[i] / phi.sqrt();
            }
        }
        a[n - 1] = a_n;
        a[0] = -a_n;
        a
    };

    let mean = mean(&x)?;
    let ss: f64 = x.iter().map(|v| (v - mean).powi(2)).sum();
    let numerator: f64 = weights.iter().zip(&x).map(|(a, v)| a * v).sum();
    let w = (numerator * numerator / ss).min(1.0);

    let p_value = if n == 3 {
        let p = 6.0 / std::f64::consts::PI * (w.sqrt().asin() - 0.75f64.sqrt().asin());
        p.clamp(0.0, 1.0)
    } else if n <= 11 {
        let gamma = poly(&[-2.273, 0.459], nf);
        let y = (1.0 - w).ln();
        if y >= gamma {
            0.0
        } else {
            let y = -(gamma - y).ln();
            let mu = poly(&[0.544, -0.399_78, 0.025_054, -6.714e-4], nf);
            let sigma = poly(&[1.3822, -0.778_57, 0.062_767, -0.002_032_2], nf).exp();
            1.0 - standard.cdf((y - mu) / sigma)
        }
    } else {
        let ln_n = nf.ln();
        let y = (1.0 - w).ln();
        let mu = poly(&[-1.5861, -0.310_82, -0.083_751, 0.003_891_5], ln_n);
        let sigma = poly(&[-0.4803, -0.082_676, 0.003_030_2], ln_n).exp();
        1.0 - standard.cdf((y - mu) / sigma)
    };

    Some(NormalityTest {
        statistic: w,
        p_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal_scores(n: usize) -> Vec<f64> {
        let standard = Normal::new(0.0, 1.0).unwrap();
        (1..=n)
            .map(|i| standard.inverse_cdf((i as f64 - 0.5) / n as f64))
            .collect()
    }

    #[test]
    fn test_rejects_out_of_range_samples() {
        assert!(shapiro_wilk(&[1.0, 2.0]).is_none());
        assert!(shapiro_wilk(&[5.0; 10]).is_none());
        assert!(shapiro_wilk(&vec![1.0; NORMALITY_MAX_SAMPLES + 1]).is_none());
    }

    #[test]
    fn test_normal_scores_look_normal() {
        for n in [4, 8, 30, 200] {
            let result = shapiro_wilk(&normal_scores(n)).unwrap();
            assert!(result.statistic > 0.9, "n={n} W={}", result.statistic);
            assert!(result.p_value > 0.05, "n={n} p={}", result.p_value);
        }
    }

    #[test]
    fn test_skewed_sample_is_rejected() {
        let mut values = vec![1.0; 19];
        values.push(50.0);
        values[0] = 1.5;
        let result = shapiro_wilk(&values).unwrap();
        assert!(result.p_value < 0.05, "p={}", result.p_value);

        let exponential: Vec<f64> = (1..=60).map(|i| (f64::from(i) / 6.0).exp()).collect();
        let result = shapiro_wilk(&exponential).unwrap();
        assert!(result.p_value < 0.05, "p={}", result.p_value);
    }

    #[test]
    fn test_reference_sample() {
        let values = [
            148.0, 154.0, 158.0, 160.0, 161.0, 162.0, 166.0, 170.0, 182.0, 195.0, 236.0,
        ];
        let result = shapiro_wilk(&values).unwrap();
        assert!((result.statistic - 0.7888).abs() < 1e-3);
        assert!((result.p_value - 0.0067).abs() < 1e-3);
    }

    #[test]
    fn test_three_values() {
        let result = shapiro_wilk(&[1.0, 2.0, 3.0]).unwrap();
        assert!((result.statistic - 1.0).abs() < 1e-9);
        assert!((result.p_value - 1.0).abs() < 1e-6);
    }
}

//! Descriptive statistics over plain `f64` samples.
//!
//! Inputs are the non-missing values of a column. Functions return `None`
//! when the sample is too small for the statistic to be defined.

use tablescope_model::Quartiles;

/// Upper bound on the automatic histogram bin count.
const MAX_HISTOGRAM_BINS: usize = 200;

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// True when every value is identical.
pub fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Smallest and largest value.
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

fn central_moments(values: &[f64]) -> Option<(f64, f64, f64)> {
    let mean = mean(values)?;
    let n = values.len() as f64;
    let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
    for &x in values {
        let d = x - mean;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }
    Some((m2 / n, m3 / n, m4 / n))
}

/// Population standard deviation (divisor `n`). Zero for a constant sample.
pub fn population_std(values: &[f64]) -> Option<f64> {
    if is_constant(values) {
        return if values.is_empty() { None } else { Some(0.0) };
    }
    let (m2, _, _) = central_moments(values)?;
    Some(m2.sqrt())
}

/// Bias-corrected sample skewness (adjusted Fisher-Pearson, `G1`).
///
/// Needs at least three values; a constant sample has skewness 0.
pub fn skewness(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 3 {
        return None;
    }
    if is_constant(values) {
        return Some(0.0);
    }
    let (m2, m3, _) = central_moments(values)?;
    let g1 = m3 / m2.powf(1.5);
    let n = n as f64;
    Some((n * (n - 1.0)).sqrt() / (n - 2.0) * g1)
}

/// Bias-corrected excess kurtosis (`G2`).
///
/// Needs at least four values; a constant sample has kurtosis 0.
pub fn excess_kurtosis(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 4 {
        return None;
    }
    if is_constant(values) {
        return Some(0.0);
    }
    let (m2, _, m4) = central_moments(values)?;
    let g2 = m4 / (m2 * m2) - 3.0;
    let n = n as f64;
    Some(((n + 1.0) * g2 + 6.0) * (n - 1.0) / ((n - 2.0) * (n - 3.0)))
}

/// Quantile of an ascending-sorted sample, interpolating linearly between
/// order statistics.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Returns an ascending copy of the sample.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Median.
pub fn median(values: &[f64]) -> Option<f64> {
    quantile_sorted(&sorted(values), 0.5)
}

/// Q1, median and Q3.
pub fn quartiles(values: &[f64]) -> Option<Quartiles> {
    let sorted = sorted(values);
    Some(Quartiles {
        q1: quantile_sorted(&sorted, 0.25)?,
        median: quantile_sorted(&sorted, 0.5)?,
        q3: quantile_sorted(&sorted, 0.75)?,
    })
}

/// Number of values outside the Tukey fences.
pub fn count_outliers(values: &[f64], quartiles: &Quartiles) -> usize {
    values.iter().filter(|&&v| quartiles.is_outlier(v)).count()
}

/// One histogram bin. The last bin includes its right edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
    /// `count / (n * width)`, so bin areas sum to 1.
    pub density: f64,
}

/// Automatic bin count: the larger of Sturges and Freedman-Diaconis.
pub fn auto_bin_count(values: &[f64]) -> usize {
    let n = values.len();
    if n < 2 {
        return 1;
    }
    let sturges = (n as f64).log2().ceil() as usize + 1;
    let Some((lo, hi)) = min_max(values) else {
        return 1;
    };
    let range = hi - lo;
    let iqr = quartiles(values).map(|q| q.iqr()).unwrap_or(0.0);
    let fd = if iqr > 0.0 && range > 0.0 {
        let width = 2.0 * iqr / (n as f64).cbrt();
        (range / width).ceil() as usize
    } else {
        0
    };
    sturges.max(fd).clamp(1, MAX_HISTOGRAM_BINS)
}

/// Density histogram with an automatic bin count.
///
/// A constant sample gets a single unit-width bin centred on the value.
pub fn histogram(values: &[f64]) -> Vec<HistogramBin> {
    let Some((lo, hi)) = min_max(values) else {
        return Vec::new();
    };
    let n = values.len() as f64;
    if hi == lo {
        return vec![HistogramBin {
            start: lo - 0.5,
            end: lo + 0.5,
            count: values.len(),
            density: 1.0,
        }];
    }
    let bins = auto_bin_count(values);
    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in values {
        let index = (((v - lo) / width) as usize).min(bins - 1);
        counts[index] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: lo + width * i as f64,
            end: lo + width * (i + 1) as f64,
            count,
            density: count as f64 / (n * width),
        })
        .collect()
}

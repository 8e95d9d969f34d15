//! Synthetic table generation.
//!
//! Dimensions are clamped to [`MIN_ROWS`]..=[`MAX_ROWS`] rows and
//! [`MIN_COLS`]..=[`MAX_COLS`] columns. Columns are named `col_1..col_n`.

use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use polars::prelude::*;
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use statrs::distribution::Normal;
use tracing::{debug, info};

use crate::error::{IngestError, Result};

pub const MIN_ROWS: usize = 1;
pub const MAX_ROWS: usize = 1000;
pub const MIN_COLS: usize = 1;
pub const MAX_COLS: usize = 10;

/// Upper bound of the noise standard deviation for the linear pattern.
const LINEAR_NOISE_MAX_SD: f64 = 10.0;
/// Sine noise standard deviation as a fraction of the column amplitude.
const SINE_NOISE_RATIO: f64 = 0.1;

/// Shape of the generated values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pattern {
    /// `cell(i, j) = (i + 1) * (j + 1)`.
    #[default]
    Linear,
    /// One sine wave per column with random amplitude, frequency and phase.
    Sine,
    /// Independent standard normal samples.
    Gaussian,
}

impl Pattern {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Sine => "sine",
            Self::Gaussian => "gaussian",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pattern {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "sine" | "sin" => Ok(Self::Sine),
            "gaussian" | "random" => Ok(Self::Gaussian),
            _ => Err(IngestError::UnknownPattern {
                name: s.to_string(),
            }),
        }
    }
}

/// Parameters for [`generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Requested row count; clamped before use.
    pub rows: i64,
    /// Requested column count; clamped before use.
    pub cols: i64,
    pub pattern: Pattern,
    /// Add Gaussian noise (linear and sine patterns only).
    pub noise: bool,
    /// Seed for reproducible output; entropy-seeded when `None`.
    pub seed: Option<u64>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            rows: 100,
            cols: 3,
            pattern: Pattern::Linear,
            noise: false,
            seed: None,
        }
    }
}

/// Clamps requested dimensions into the supported range.
///
/// # Examples
///
/// ```
/// use tablescope_ingest::clamp_dimensions;
///
/// assert_eq!(clamp_dimensions(5000, 3), (1000, 3));
/// assert_eq!(clamp_dimensions(-4, 0), (1, 1));
/// assert_eq!(clamp_dimensions(10, 99), (10, 10));
/// ```
pub fn clamp_dimensions(rows: i64, cols: i64) -> (usize, usize) {
    let rows = rows.clamp(MIN_ROWS as i64, MAX_ROWS as i64) as usize;
    let cols = cols.clamp(MIN_COLS as i64, MAX_COLS as i64) as usize;
    (rows, cols)
}

/// Builds the random generator for a run.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Generates a synthetic table.
pub fn generate(options: &GenerateOptions) -> Result<DataFrame> {
    let (rows, cols) = clamp_dimensions(options.rows, options.cols);
    if rows as i64 != options.rows || cols as i64 != options.cols {
        debug!(
            requested_rows = options.rows,
            requested_cols = options.cols,
            rows,
            cols,
            "clamped generator dimensions"
        );
    }
    let mut rng = seeded_rng(options.seed);
    let standard = Normal::new(0.0, 1.0).map_err(|e| IngestError::Distribution {
        message: e.to_string(),
    })?;

    let data = match options.pattern {
        Pattern::Linear => linear_values(rows, cols, options.noise, &mut rng, &standard),
        Pattern::Sine => sine_values(rows, cols, options.noise, &mut rng, &standard),
        Pattern::Gaussian => gaussian_values(rows, cols, &mut rng, &standard),
    };

    let columns = data
        .into_iter()
        .enumerate()
        .map(|(j, values)| Column::new(format!("col_{}", j + 1).into(), values))
        .collect::<Vec<_>>();
    let df = DataFrame::new(columns)?;
    info!(
        rows,
        cols,
        pattern = %options.pattern,
        noise = options.noise,
        seeded = options.seed.is_some(),
        "generated table"
    );
    Ok(df)
}

fn linear_values(
    rows: usize,
    cols: usize,
    noise: bool,
    rng: &mut StdRng,
    standard: &Normal,
) -> Vec<Vec<f64>> {
    let noise_sd = if noise {
        rng.gen_range(0.0..=LINEAR_NOISE_MAX_SD)
    } else {
        0.0
    };
    (0..cols)
        .map(|j| {
            (0..rows)
                .map(|i| {
                    let base = ((i + 1) * (j + 1)) as f64;
                    if noise {
                        base + noise_sd * standard.sample(rng)
                    } else {
                        base
                    }
                })
                .collect()
        })
        .collect()
}

fn sine_values(
    rows: usize,
    cols: usize,
    noise: bool,
    rng: &mut StdRng,
    standard: &Normal,
) -> Vec<Vec<f64>> {
    (0..cols)
        .map(|_| {
            let amplitude = rng.gen_range(1.0..10.0);
            let cycles = f64::from(rng.gen_range(1u32..=5));
            let frequency = TAU * cycles / rows as f64;
            let phase = rng.gen_range(0.0..TAU);
            (0..rows)
                .map(|i| {
                    let value = amplitude * (frequency * i as f64 + phase).sin();
                    if noise {
                        value + SINE_NOISE_RATIO * amplitude * standard.sample(rng)
                    } else {
                        value
                    }
                })
                .collect()
        })
        .collect()
}

fn gaussian_values(
    rows: usize,
    cols: usize,
    rng: &mut StdRng,
    standard: &Normal,
) -> Vec<Vec<f64>> {
    (0..cols)
        .map(|_| (0..rows).map(|_| standard.sample(rng)).collect())
        .collect()
}

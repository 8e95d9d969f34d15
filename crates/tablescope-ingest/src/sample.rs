//! Row previews: head, tail or a random subset.

use std::fmt;
use std::str::FromStr;

use polars::prelude::*;
use rand::seq::index;
use tracing::warn;

use crate::error::{IngestError, Result};
use crate::generate::seeded_rng;

/// Which rows a preview shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleMode {
    #[default]
    Head,
    Tail,
    Random,
}

impl SampleMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Tail => "tail",
            Self::Random => "random",
        }
    }
}

impl fmt::Display for SampleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SampleMode {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "head" => Ok(Self::Head),
            "tail" => Ok(Self::Tail),
            "random" => Ok(Self::Random),
            _ => Err(IngestError::UnknownSampleMode {
                mode: s.to_string(),
            }),
        }
    }
}

/// Rows selected for a preview, with the adjustments made to the request.
#[derive(Debug, Clone)]
pub struct Sample {
    pub frame: DataFrame,
    pub mode: SampleMode,
    /// Number of rows actually shown.
    pub shown: usize,
    /// Human-readable notes about clamping of the requested count.
    pub notices: Vec<String>,
}

/// Selects up to `n` rows for display.
///
/// `n < 1` is raised to 1 and `n` above the row count is lowered to the row
/// count; each adjustment adds a notice. Random rows are drawn without
/// replacement and kept in table order.
pub fn sample(df: &DataFrame, n: i64, mode: SampleMode, seed: Option<u64>) -> Result<Sample> {
    let height = df.height();
    let mut notices = Vec::new();
    let mut count = n;
    if count < 1 {
        notices.push(format!(
            "Requested {n} rows; the number of rows must be at least 1, showing 1."
        ));
        count = 1;
    }
    let mut shown = usize::try_from(count).unwrap_or(usize::MAX);
    if shown > height {
        notices.push(format!(
            "Requested {count} rows but the table has only {height}; showing all rows."
        ));
        shown = height;
    }
    for notice in &notices {
        warn!(requested = n, rows = height, "{notice}");
    }

    let frame = match mode {
        SampleMode::Head => df.head(Some(shown)),
        SampleMode::Tail => df.tail(Some(shown)),
        SampleMode::Random => {
            let mut rng = seeded_rng(seed);
            let mut picked: Vec<IdxSize> = index::sample(&mut rng, height, shown)
                .into_iter()
                .map(|i| i as IdxSize)
                .collect();
            picked.sort_unstable();
            let indices = IdxCa::from_vec("index".into(), picked);
            df.take(&indices)?
        }
    };

    Ok(Sample {
        frame,
        mode,
        shown,
        notices,
    })
}

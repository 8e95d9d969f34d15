//! Resolving the table a command works on.

use std::path::PathBuf;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tablescope_ingest::{GenerateOptions, Pattern, generate, load_path};
use tracing::{info, trace};

use crate::logging::{log_data_enabled, redact_value};
use crate::settings::GeneratorSettings;

/// A file to load, or generator overrides on top of the settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceRequest {
    pub input: Option<PathBuf>,
    pub rows: Option<i64>,
    pub cols: Option<i64>,
    pub pattern: Option<String>,
    pub seed: Option<u64>,
    /// `true` forces noise on; `false` defers to the settings.
    pub noise: bool,
}

impl SourceRequest {
    /// Generator options: explicit values win over the settings.
    pub fn generate_options(&self, defaults: &GeneratorSettings) -> Result<GenerateOptions> {
        let pattern: Pattern = self
            .pattern
            .as_deref()
            .unwrap_or(&defaults.pattern)
            .parse()?;
        Ok(GenerateOptions {
            rows: self.rows.unwrap_or(defaults.rows),
            cols: self.cols.unwrap_or(defaults.cols),
            pattern,
            noise: self.noise || defaults.noise,
            seed: self.seed.or(defaults.seed),
        })
    }

    /// Seed for random previews.
    pub fn seed(&self, defaults: &GeneratorSettings) -> Option<u64> {
        self.seed.or(defaults.seed)
    }
}

/// Loads the requested file, or generates a table.
pub fn load_table(request: &SourceRequest, defaults: &GeneratorSettings) -> Result<DataFrame> {
    let df = match &request.input {
        Some(path) => {
            let df = load_path(path).with_context(|| format!("load {}", path.display()))?;
            info!(path = %path.display(), rows = df.height(), cols = df.width(), "loaded table");
            df
        }
        None => generate(&request.generate_options(defaults)?)?,
    };
    log_first_row(&df);
    Ok(df)
}

fn log_first_row(df: &DataFrame) {
    if !log_data_enabled() || df.height() == 0 {
        return;
    }
    let row = df
        .get_columns()
        .iter()
        .map(|column| {
            column
                .get(0)
                .map(tablescope_common::any_to_string)
                .unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join(", ");
    trace!(first_row = redact_value(&row), "table sample");
}

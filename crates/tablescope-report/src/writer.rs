//! Dated report files under an output directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use polars::prelude::DataFrame;
use tablescope_ingest::write_csv_path;
use tablescope_model::Prediction;
use tracing::info;
use uuid::Uuid;

use crate::html::page;

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "data";

const CORRELATION_DIR: &str = "correlation";
const DISTRIBUTION_DIR: &str = "distribution";
const PLOTS_DIR: &str = "plots";
const PREDICTIONS_DIR: &str = "predictions";

/// Files written by [`ReportWriter::save_prediction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPrediction {
    pub data: PathBuf,
    pub text: PathBuf,
}

/// Persists reports below a root directory, creating subdirectories on
/// demand.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    root: PathBuf,
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}

fn timestamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Keeps file names portable: anything outside `[A-Za-z0-9_-]` becomes `_`.
fn sanitize(base: &str) -> String {
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "plot".to_string()
    } else {
        cleaned
    }
}

impl ReportWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn subdir(&self, name: &str) -> Result<PathBuf> {
        let dir = self.root.join(name);
        fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
        Ok(dir)
    }

    fn write(&self, path: PathBuf, contents: &str) -> Result<PathBuf> {
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        info!(path = %path.display(), bytes = contents.len(), "saved report");
        Ok(path)
    }

    /// Saves a correlation report as
    /// `correlation/correlation_report_YYYYMMDD_HHMMSS.html`.
    pub fn save_correlation(&self, fragment: &str) -> Result<PathBuf> {
        let dir = self.subdir(CORRELATION_DIR)?;
        let path = dir.join(format!("correlation_report_{}.html", timestamp()));
        self.write(path, &page("Correlation report", fragment))
    }

    /// Saves a distribution report as
    /// `distribution/distribution_analysis_YYYYMMDD_HHMMSS.html`.
    pub fn save_distribution(&self, fragment: &str) -> Result<PathBuf> {
        let dir = self.subdir(DISTRIBUTION_DIR)?;
        let path = dir.join(format!("distribution_analysis_{}.html", timestamp()));
        self.write(path, &page("Distribution analysis", fragment))
    }

    /// Saves a plot page as `plots/<base>_<8 hex>.html`.
    pub fn save_plot_page(&self, base: &str, title: &str, fragment: &str) -> Result<PathBuf> {
        let dir = self.subdir(PLOTS_DIR)?;
        let suffix = Uuid::new_v4().simple().to_string();
        let path = dir.join(format!("{}_{}.html", sanitize(base), &suffix[..8]));
        self.write(path, &page(title, fragment))
    }

    /// Saves the source table as CSV next to the prediction text.
    pub fn save_prediction(&self, df: &DataFrame, prediction: &Prediction) -> Result<SavedPrediction> {
        let dir = self.subdir(PREDICTIONS_DIR)?;
        let stamp = timestamp();
        let data = dir.join(format!("data_{stamp}.csv"));
        write_csv_path(df, &data).with_context(|| format!("write {}", data.display()))?;
        let text = dir.join(format!("prediction_{stamp}.txt"));
        let text = self.write(text, &prediction.summary_text())?;
        Ok(SavedPrediction { data, text })
    }
}

//! One function per user-facing operation.
//!
//! Each takes the table explicitly and returns a structured outcome that
//! the caller prints; optional report files go through [`ReportWriter`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tablescope_ingest::{Sample, SampleMode, sample, write_csv_path};
use tablescope_model::Prediction;
use tablescope_plot::{PlotKind, RenderedPlot, render};
use tablescope_predict::{PredictError, fit_and_predict, parse_features};
use tablescope_report::{
    CorrelationReport, DistributionReport, ReportWriter, SavedPrediction, correlation_report,
    distribution_report, plot_card, plot_title, plots_html, prediction_html, preview_html,
};
use tracing::{debug, info};

use crate::logging::redact_value;

/// Writes the table as CSV when a path is given.
pub fn run_generate(df: &DataFrame, output: Option<&Path>) -> Result<Option<PathBuf>> {
    let Some(path) = output else {
        return Ok(None);
    };
    write_csv_path(df, path).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), "wrote generated table");
    Ok(Some(path.to_path_buf()))
}

#[derive(Debug, Clone)]
pub struct PreviewOutcome {
    pub sample: Sample,
    pub html: String,
}

pub fn run_preview(df: &DataFrame, n: i64, mode: SampleMode, seed: Option<u64>) -> Result<PreviewOutcome> {
    let sample = sample(df, n, mode, seed)?;
    let html = preview_html(&sample)?;
    Ok(PreviewOutcome { sample, html })
}

#[derive(Debug, Clone)]
pub struct CorrelateOutcome {
    pub report: CorrelationReport,
    pub saved: Option<PathBuf>,
}

pub fn run_correlate(df: &DataFrame, writer: Option<&ReportWriter>) -> Result<CorrelateOutcome> {
    let report = correlation_report(df)?;
    let saved = writer
        .map(|writer| writer.save_correlation(&report.html))
        .transpose()?;
    Ok(CorrelateOutcome { report, saved })
}

#[derive(Debug, Clone)]
pub struct DescribeOutcome {
    pub report: DistributionReport,
    pub saved: Option<PathBuf>,
}

pub fn run_describe(df: &DataFrame, writer: Option<&ReportWriter>) -> Result<DescribeOutcome> {
    let report = distribution_report(df)?;
    let saved = writer
        .map(|writer| writer.save_distribution(&report.html))
        .transpose()?;
    Ok(DescribeOutcome { report, saved })
}

#[derive(Debug, Clone)]
pub struct PlotOutcome {
    pub kind: PlotKind,
    pub plots: Vec<RenderedPlot>,
    /// One page per histogram column, or a single page for box and scatter.
    pub pages: Vec<PathBuf>,
    pub html: String,
}

pub fn run_plot(df: &DataFrame, kind: PlotKind, writer: &ReportWriter) -> Result<PlotOutcome> {
    let plots = render(df, kind)?;
    let html = plots_html(kind, &plots);
    let pages = match kind {
        PlotKind::Hist => plots
            .iter()
            .map(|plot| {
                let title = format!("Histogram of {}", plot.label);
                writer.save_plot_page(&format!("hist_{}", plot.label), &title, &plot_card(kind, plot))
            })
            .collect::<Result<Vec<_>>>()?,
        PlotKind::Box | PlotKind::Scatter => {
            vec![writer.save_plot_page(kind.as_str(), plot_title(kind), &html)?]
        }
    };
    debug!(kind = %kind, images = plots.len(), pages = pages.len(), "wrote plot pages");
    Ok(PlotOutcome {
        kind,
        plots,
        pages,
        html,
    })
}

#[derive(Debug, Clone)]
pub struct PredictOutcome {
    pub prediction: Prediction,
    pub html: String,
    pub saved: Option<SavedPrediction>,
}

/// Predicts column `target` (numbered from 1) at the given feature values.
pub fn run_predict(
    df: &DataFrame,
    target: usize,
    features: &str,
    writer: Option<&ReportWriter>,
) -> Result<PredictOutcome> {
    let Some(index) = target.checked_sub(1) else {
        return Err(PredictError::InvalidTargetColumn {
            index: target,
            columns: df.width(),
        })
        .context("target columns are numbered from 1");
    };
    debug!(target, features = redact_value(features), "predict request");
    let values = parse_features(features)?;
    let prediction = fit_and_predict(df, index, &values)
        .with_context(|| format!("predict column {target} (numbered from 1)"))?;
    let html = prediction_html(&prediction);
    let saved = writer
        .map(|writer| writer.save_prediction(df, &prediction))
        .transpose()?;
    Ok(PredictOutcome {
        prediction,
        html,
        saved,
    })
}

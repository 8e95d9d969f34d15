//! HTML fragments for each analysis view.

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tablescope_analysis::{classify, correlate, describe_column};
use tablescope_common::numeric_columns;
use tablescope_ingest::Sample;
use tablescope_model::{
    ColumnPair, ColumnStatistics, CorrelationClassification, CorrelationMatrix, Prediction,
};
use tablescope_plot::{PlotKind, RenderedPlot, render_distribution, render_heatmap};
use tracing::debug;

use crate::html::{AlertLevel, alert, escape_html, frame_table, image_tag, stats_table, table};

// === Sample preview ===

/// Preview heading, clamp notices and the selected rows.
pub fn preview_html(sample: &Sample) -> Result<String> {
    let mut out = format!(
        "<h3 class='mt-3'>Displayed rows ({}, {} records)</h3>",
        sample.mode, sample.shown
    );
    for notice in &sample.notices {
        out.push_str(&alert(AlertLevel::Warning, notice));
    }
    out.push_str(&frame_table(&sample.frame)?);
    Ok(out)
}

// === Correlation ===

fn format_coefficient(r: Option<f64>) -> String {
    r.map_or_else(|| "NaN".to_string(), |r| format!("{r:.4}"))
}

/// The matrix as a table, coefficients to four decimals.
pub fn correlation_table_html(matrix: &CorrelationMatrix) -> String {
    let headers = std::iter::once("").chain(matrix.columns().iter().map(String::as_str));
    let rows = matrix.columns().iter().zip(matrix.rows()).map(|(name, row)| {
        std::iter::once(name.clone())
            .chain(row.iter().map(|r| format_coefficient(*r)))
            .collect::<Vec<_>>()
    });
    format!(
        "<h3 class='mt-3'>Correlation Matrix</h3>{}",
        table(headers, rows)
    )
}

fn pair_list(class: &str, heading: &str, pairs: &[ColumnPair]) -> String {
    let items: String = pairs
        .iter()
        .map(|pair| {
            format!(
                "<li><strong>{}</strong> and <strong>{}</strong>: r = {:.2}</li>",
                escape_html(&pair.first),
                escape_html(&pair.second),
                pair.r
            )
        })
        .collect();
    format!(
        "<div class='list-group-item {class}'><h6>{heading}</h6><ul class='mb-0'>{items}</ul></div>"
    )
}

fn conclusions_frame(items: &str) -> String {
    format!("<div class='mt-4'><h4>Correlation conclusions</h4><div class='list-group'>{items}</div></div>")
}

/// Lists strong positive, strong negative and up to five weak pairs.
pub fn conclusions_html(classification: &CorrelationClassification) -> String {
    if classification.is_empty() {
        return conclusions_frame(
            "<div class='list-group-item list-group-item-secondary'><em>No significant correlations found.</em></div>",
        );
    }
    let mut items = String::new();
    if !classification.strong_positive.is_empty() {
        items.push_str(&pair_list(
            "list-group-item-success",
            "Strong positive correlation:",
            &classification.strong_positive,
        ));
    }
    if !classification.strong_negative.is_empty() {
        items.push_str(&pair_list(
            "list-group-item-danger",
            "Strong negative correlation:",
            &classification.strong_negative,
        ));
    }
    if !classification.weak.is_empty() {
        let heading = if classification.weak_total > classification.weak.len() {
            format!(
                "Weak or no correlation (first {} of {}):",
                classification.weak.len(),
                classification.weak_total
            )
        } else {
            "Weak or no correlation:".to_string()
        };
        items.push_str(&pair_list(
            "list-group-item-warning",
            &heading,
            &classification.weak,
        ));
    }
    items.push_str(
        "<div class='list-group-item'><small class='text-muted'>Pairs with moderate correlation are not listed.</small></div>",
    );
    conclusions_frame(&items)
}

/// Conclusions for a table, or a notice when it has fewer than two
/// numeric columns.
pub fn table_conclusions_html(df: &DataFrame) -> String {
    match correlate(df) {
        Ok(matrix) => conclusions_html(&classify(&matrix)),
        Err(err) => {
            debug!(error = %err, "skipping correlation conclusions");
            conclusions_frame(
                "<div class='list-group-item list-group-item-secondary'><em>Not enough data for correlation analysis.</em></div>",
            )
        }
    }
}

/// Correlation results together with their rendering.
#[derive(Debug, Clone)]
pub struct CorrelationReport {
    pub matrix: CorrelationMatrix,
    pub classification: CorrelationClassification,
    pub html: String,
}

/// Matrix table, heatmap and conclusions.
///
/// Fails when the table has fewer than two numeric columns.
pub fn correlation_report(df: &DataFrame) -> Result<CorrelationReport> {
    let matrix = correlate(df).context("correlation analysis failed")?;
    let classification = classify(&matrix);
    let heatmap = render_heatmap(&matrix).context("failed to render correlation heatmap")?;
    let html = format!(
        "{}<h3 class='mt-3'>Correlation Heatmap</h3>{}{}",
        correlation_table_html(&matrix),
        image_tag(&heatmap, "Correlation heatmap"),
        conclusions_html(&classification)
    );
    Ok(CorrelationReport {
        matrix,
        classification,
        html,
    })
}

// === Distribution ===

fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.4}"))
}

fn distribution_rows(stats: &ColumnStatistics) -> Vec<[String; 2]> {
    vec![
        ["Mean".to_string(), format!("{:.4}", stats.mean)],
        ["Median".to_string(), format!("{:.4}", stats.median)],
        ["Std. deviation".to_string(), format!("{:.4}", stats.std)],
        ["Skewness".to_string(), format_optional(stats.skewness)],
        ["Kurtosis".to_string(), format_optional(stats.kurtosis)],
        [
            "Normal distribution?".to_string(),
            if stats.is_normal { "Yes" } else { "No" }.to_string(),
        ],
        ["Outlier count".to_string(), stats.outliers.to_string()],
        [
            "Outlier percentage".to_string(),
            format!("{:.2}%", stats.outlier_percent),
        ],
    ]
}

/// Distribution statistics together with their rendering.
#[derive(Debug, Clone)]
pub struct DistributionReport {
    pub columns: Vec<ColumnStatistics>,
    pub html: String,
}

/// One card per described column with its chart and statistics.
pub fn distribution_report(df: &DataFrame) -> Result<DistributionReport> {
    let numeric = numeric_columns(df)?;
    let mut columns = Vec::new();
    let mut cards = Vec::new();
    for column in &numeric {
        let Some(stats) = describe_column(column) else {
            continue;
        };
        let chart = render_distribution(&column.present(), &stats)
            .with_context(|| format!("failed to render distribution of {}", column.name))?;
        let name = escape_html(&stats.column);
        cards.push(format!(
            "<div class='card mb-4'><div class='card-header'><h4>Column: {name}</h4></div>\
             <div class='card-body'><div class='row'><div class='col-md-6'>{}</div>\
             <div class='col-md-6'>{}</div></div></div></div>",
            image_tag(&chart, &format!("Distribution of {}", stats.column)),
            table(["Statistic", "Value"], distribution_rows(&stats)),
        ));
        columns.push(stats);
    }
    let html = if cards.is_empty() {
        alert(AlertLevel::Warning, "No numeric columns to analyze")
    } else {
        cards.join("\n")
    };
    Ok(DistributionReport { columns, html })
}

// === Plots ===

/// Section title for a plot kind.
pub fn plot_title(kind: PlotKind) -> &'static str {
    match kind {
        PlotKind::Hist => "Histograms",
        PlotKind::Box => "Box plot",
        PlotKind::Scatter => "Scatter matrix",
    }
}

/// A card with one rendered image and its statistics table.
pub fn plot_card(kind: PlotKind, plot: &RenderedPlot) -> String {
    let alt = match kind {
        PlotKind::Hist => plot.label.as_str(),
        PlotKind::Box | PlotKind::Scatter => plot_title(kind),
    };
    let image = image_tag(&plot.image, alt);
    let body = if plot.stats.is_empty() {
        format!("<div class='col-md-12'>{image}</div>")
    } else {
        format!(
            "<div class='col-md-6'>{image}</div><div class='col-md-6'>{}</div>",
            stats_table(&plot.stats)
        )
    };
    format!("<div class='card mb-4'><div class='card-body'><div class='row'>{body}</div></div></div>")
}

/// Title followed by one card per rendered image.
pub fn plots_html(kind: PlotKind, plots: &[RenderedPlot]) -> String {
    let mut out = format!("<h3 class='mt-3 mb-4'>{}</h3>", plot_title(kind));
    for plot in plots {
        out.push_str(&plot_card(kind, plot));
    }
    out
}

// === Prediction ===

/// Success banner describing a prediction.
pub fn prediction_html(prediction: &Prediction) -> String {
    let features = prediction
        .features
        .iter()
        .map(|f| format!("{}: {:.2}", escape_html(&f.name), f.value))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "<div class='alert alert-success'><h4>Prediction result</h4>\
         <p><strong>Target variable:</strong> {}</p>\
         <p><strong>Features:</strong> {features}</p>\
         <p><strong>Predicted value:</strong> {:.4}</p>\
         <p><strong>Training R²:</strong> {:.4}</p></div>",
        escape_html(&prediction.target),
        prediction.value,
        prediction.r_squared
    )
}

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use polars::prelude::*;
use tablescope_ingest::{GenerateOptions, Pattern, SampleMode, generate, sample};
use tablescope_model::{FeatureValue, Prediction};
use tablescope_plot::{PlotKind, render};
use tablescope_report::{
    ReportWriter, correlation_report, distribution_report, plots_html, preview_html,
    table_conclusions_html,
};

fn generated(pattern: Pattern) -> DataFrame {
    generate(&GenerateOptions {
        rows: 60,
        cols: 3,
        pattern,
        noise: false,
        seed: Some(11),
    })
    .unwrap()
}

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Decodes every inline PNG in `html`.
fn embedded_images(html: &str) -> Vec<Vec<u8>> {
    html.split(DATA_URI_PREFIX)
        .skip(1)
        .map(|rest| {
            let payload = rest.split('\'').next().unwrap();
            STANDARD.decode(payload).unwrap()
        })
        .collect()
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}

#[test]
fn correlation_report_on_linear_table() {
    let report = correlation_report(&generated(Pattern::Linear)).unwrap();
    assert_eq!(report.classification.strong_positive.len(), 3);
    assert!(report.html.contains("Correlation Matrix"));
    assert!(report.html.contains("data:image/png;base64,"));
    assert!(report.html.contains("<strong>col_1</strong> and <strong>col_2</strong>: r = 1.00"));

    let images = embedded_images(&report.html);
    assert_eq!(images.len(), 1);
    assert!(images[0].starts_with(PNG_SIGNATURE));
}

#[test]
fn correlation_needs_two_numeric_columns() {
    let df = df!("x" => [1.0, 2.0], "name" => ["a", "b"]).unwrap();
    assert!(correlation_report(&df).is_err());
    assert!(table_conclusions_html(&df).contains("Not enough data for correlation analysis."));
}

#[test]
fn distribution_report_cards() {
    let report = distribution_report(&generated(Pattern::Gaussian)).unwrap();
    assert_eq!(report.columns.len(), 3);
    assert_eq!(report.html.matches("<div class='card mb-4'>").count(), 3);
    assert!(report.html.contains("Column: col_2"));
    let images = embedded_images(&report.html);
    assert_eq!(images.len(), 3);
    assert!(images.iter().all(|png| png.starts_with(PNG_SIGNATURE)));

    let text = df!("name" => ["a", "b"]).unwrap();
    let report = distribution_report(&text).unwrap();
    assert!(report.columns.is_empty());
    assert!(report.html.contains("alert-warning"));
    assert!(report.html.contains("No numeric columns to analyze"));
}

#[test]
fn preview_heading_and_notices() {
    let df = generated(Pattern::Linear);
    let preview = sample(&df, 500, SampleMode::Tail, None).unwrap();
    let html = preview_html(&preview).unwrap();
    assert!(html.starts_with("<h3 class='mt-3'>Displayed rows (tail, 60 records)</h3>"));
    assert!(html.contains("alert-warning"));
    assert_eq!(html.matches("<tr>").count(), 61);
}

#[test]
fn plot_section_has_a_card_per_image() {
    let df = generated(Pattern::Sine);
    let plots = render(&df, PlotKind::Hist).unwrap();
    let html = plots_html(PlotKind::Hist, &plots);
    assert!(html.starts_with("<h3 class='mt-3 mb-4'>Histograms</h3>"));
    assert_eq!(html.matches("class='card mb-4'").count(), 3);
}

#[test]
fn writer_uses_dated_file_names() {
    let dir = tempfile::tempdir().unwrap();
    let writer = ReportWriter::new(dir.path());

    let path = writer.save_correlation("<p>x</p>").unwrap();
    assert!(path.starts_with(dir.path().join("correlation")));
    let name = file_name(&path);
    assert!(name.starts_with("correlation_report_") && name.ends_with(".html"));
    assert_eq!(name.len(), "correlation_report_20250101_120000.html".len());
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("<!DOCTYPE html>"));
    assert!(contents.contains("<p>x</p>"));

    let path = writer.save_distribution("<p>d</p>").unwrap();
    assert!(file_name(&path).starts_with("distribution_analysis_"));

    let path = writer.save_plot_page("hist_col 1", "Histograms", "<p>p</p>").unwrap();
    let name = file_name(&path);
    assert!(name.starts_with("hist_col_1_"));
    assert_eq!(name.len(), "hist_col_1_".len() + 8 + ".html".len());
}

#[test]
fn saved_prediction_has_data_and_text() {
    let dir = tempfile::tempdir().unwrap();
    let writer = ReportWriter::new(dir.path());
    let df = df!("x" => [1.0, 2.0], "y" => [2.0, 4.0]).unwrap();
    let prediction = Prediction {
        target: "y".to_string(),
        features: vec![FeatureValue {
            name: "x".to_string(),
            value: 6.0,
        }],
        value: 12.0,
        coefficients: vec![2.0],
        intercept: 0.0,
        r_squared: 1.0,
        rows_used: 2,
    };
    let saved = writer.save_prediction(&df, &prediction).unwrap();
    assert!(file_name(&saved.data).starts_with("data_"));
    assert!(file_name(&saved.text).starts_with("prediction_"));
    let csv = std::fs::read_to_string(&saved.data).unwrap();
    assert!(csv.starts_with("x,y\n"));
    let text = std::fs::read_to_string(&saved.text).unwrap();
    assert_eq!(text, "Target: y\nFeatures: x: 6.00\nPrediction: 12.0000\n");
}

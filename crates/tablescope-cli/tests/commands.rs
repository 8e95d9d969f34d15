use polars::prelude::*;
use tablescope_cli::commands::{run_correlate, run_describe, run_generate, run_plot, run_predict, run_preview};
use tablescope_cli::settings::GeneratorSettings;
use tablescope_cli::source::{SourceRequest, load_table};
use tablescope_cli::summary::{correlation_summary, predict_summary};
use tablescope_ingest::{SampleMode, load_path};
use tablescope_plot::PlotKind;
use tablescope_predict::PredictError;
use tablescope_report::ReportWriter;

fn linear(rows: i64) -> DataFrame {
    let request = SourceRequest {
        rows: Some(rows),
        cols: Some(3),
        pattern: Some("linear".to_string()),
        seed: Some(1),
        ..SourceRequest::default()
    };
    load_table(&request, &GeneratorSettings::default()).unwrap()
}

#[test]
fn generated_csv_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let df = linear(25);
    let path = dir.path().join("table.csv");
    let written = run_generate(&df, Some(&path)).unwrap();
    assert_eq!(written.as_deref(), Some(path.as_path()));
    let loaded = load_path(&path).unwrap();
    assert_eq!(loaded.shape(), (25, 3));

    let request = SourceRequest {
        input: Some(path),
        ..SourceRequest::default()
    };
    let reloaded = load_table(&request, &GeneratorSettings::default()).unwrap();
    assert_eq!(reloaded.get_column_names_str(), ["col_1", "col_2", "col_3"]);
}

#[test]
fn preview_clamps_to_table() {
    let outcome = run_preview(&linear(8), 0, SampleMode::Head, None).unwrap();
    assert_eq!(outcome.sample.shown, 1);
    assert_eq!(outcome.sample.notices.len(), 1);
}

#[test]
fn correlate_saves_when_asked() {
    let dir = tempfile::tempdir().unwrap();
    let writer = ReportWriter::new(dir.path());
    let outcome = run_correlate(&linear(30), Some(&writer)).unwrap();
    let saved = outcome.saved.as_ref().unwrap();
    assert!(saved.starts_with(dir.path().join("correlation")));
    let text = correlation_summary(&outcome);
    assert!(text.contains("Strong positive correlation:"));
    assert!(text.contains("col_1 and col_3: r = 1.00"));

    let unsaved = run_correlate(&linear(30), None).unwrap();
    assert!(unsaved.saved.is_none());
}

#[test]
fn describe_without_numeric_columns() {
    let df = df!("name" => ["a", "b", "c"]).unwrap();
    let outcome = run_describe(&df, None).unwrap();
    assert!(outcome.report.columns.is_empty());
}

#[test]
fn plot_pages_per_kind() {
    let dir = tempfile::tempdir().unwrap();
    let writer = ReportWriter::new(dir.path());
    let df = linear(40);

    let hist = run_plot(&df, PlotKind::Hist, &writer).unwrap();
    assert_eq!(hist.pages.len(), 3);
    for page in &hist.pages {
        let name = page.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("hist_col_"), "{name}");
        assert!(page.exists());
    }

    let scatter = run_plot(&df, PlotKind::Scatter, &writer).unwrap();
    assert_eq!(scatter.pages.len(), 1);
    assert!(
        scatter.pages[0]
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("scatter_")
    );
}

#[test]
fn predict_uses_one_based_target() {
    let dir = tempfile::tempdir().unwrap();
    let writer = ReportWriter::new(dir.path());
    let df = df!(
        "feature" => [1.0, 2.0, 3.0, 4.0],
        "target" => [2.0, 4.0, 6.0, 8.0],
    )
    .unwrap();

    let outcome = run_predict(&df, 2, "6", Some(&writer)).unwrap();
    assert!((outcome.prediction.value - 12.0).abs() < 1e-9);
    let saved = outcome.saved.as_ref().unwrap();
    assert!(saved.data.exists() && saved.text.exists());
    assert!(predict_summary(&outcome).starts_with("Target: target\nFeatures: feature: 6.00\nPrediction: 12.0000\n"));

    for target in [0, 3] {
        let err = run_predict(&df, target, "6", None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PredictError>(),
            Some(PredictError::InvalidTargetColumn { columns: 2, .. })
        ));
    }
    let err = run_predict(&df, 3, "6", None).unwrap_err();
    assert!(format!("{err:#}").contains("invalid target column 2 (table has 2 columns)"));
    let err = run_predict(&df, 2, "six", None).unwrap_err();
    assert!(err.to_string().contains("'six'"));
}

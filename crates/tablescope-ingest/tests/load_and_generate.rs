use std::io::Write;

use polars::prelude::*;
use proptest::prelude::*;
use tempfile::NamedTempFile;

use tablescope_ingest::{
    GenerateOptions, IngestError, MAX_COLS, MAX_ROWS, Pattern, generate, load_bytes, load_path,
    write_csv, write_csv_path,
};

fn column_values(df: &DataFrame, name: &str) -> Vec<f64> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .flatten()
        .collect()
}

#[test]
fn generated_table_survives_csv_round_trip() {
    let options = GenerateOptions {
        rows: 50,
        cols: 4,
        pattern: Pattern::Sine,
        noise: true,
        seed: Some(11),
    };
    let df = generate(&options).unwrap();
    let mut buffer = Vec::new();
    write_csv(&df, &mut buffer).unwrap();

    let reparsed = load_bytes(&buffer, "csv").unwrap();
    assert_eq!(reparsed.shape(), df.shape());
    for name in df.get_column_names_str() {
        let original = column_values(&df, name);
        let restored = column_values(&reparsed, name);
        assert_eq!(original.len(), restored.len());
        for (a, b) in original.iter().zip(&restored) {
            assert!((a - b).abs() <= 1e-9 * a.abs().max(1.0), "{a} != {b}");
        }
    }
}

#[test]
fn loads_files_by_extension() {
    let mut file = NamedTempFile::with_suffix(".tsv").unwrap();
    write!(file, "x\ty\n1\t2\n3\t4\n").unwrap();
    let df = load_path(file.path()).unwrap();
    assert_eq!(df.shape(), (2, 2));

    let other = NamedTempFile::with_suffix(".xlsx").unwrap();
    assert!(matches!(
        load_path(other.path()),
        Err(IngestError::UnsupportedFormat { .. })
    ));
}

#[test]
fn malformed_csv_reports_parse_error() {
    let err = load_bytes(b"a,b\n1,2\n3,4,5,6\n", "csv");
    assert!(matches!(err, Err(IngestError::Parse { .. })), "{err:?}");
}

#[test]
fn writes_csv_file() {
    let df = generate(&GenerateOptions {
        rows: 3,
        cols: 2,
        ..GenerateOptions::default()
    })
    .unwrap();
    let file = NamedTempFile::with_suffix(".csv").unwrap();
    write_csv_path(&df, file.path()).unwrap();
    let reloaded = load_path(file.path()).unwrap();
    assert_eq!(column_values(&reloaded, "col_2"), vec![2.0, 4.0, 6.0]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn generated_dimensions_are_clamped(rows in -5000i64..5000, cols in -50i64..50) {
        let df = generate(&GenerateOptions {
            rows,
            cols,
            pattern: Pattern::Gaussian,
            noise: false,
            seed: Some(1),
        })
        .unwrap();
        let (height, width) = df.shape();
        prop_assert!((1..=MAX_ROWS).contains(&height));
        prop_assert!((1..=MAX_COLS).contains(&width));
        prop_assert_eq!(height, rows.clamp(1, MAX_ROWS as i64) as usize);
        prop_assert_eq!(width, cols.clamp(1, MAX_COLS as i64) as usize);
    }
}

use polars::prelude::*;
use proptest::prelude::*;

use tablescope_analysis::{AnalysisError, classify, correlate, describe};
use tablescope_ingest::{GenerateOptions, Pattern, generate};

fn frame(columns: Vec<Column>) -> DataFrame {
    DataFrame::new(columns).expect("frame")
}

#[test]
fn correlate_ignores_text_columns() {
    let df = frame(vec![
        Column::new("x".into(), vec![1.0, 2.0, 3.0, 4.0]),
        Column::new("name".into(), vec!["a", "b", "c", "d"]),
        Column::new("y".into(), vec![2.0, 4.0, 6.0, 8.0]),
    ]);
    let matrix = correlate(&df).unwrap();
    assert_eq!(matrix.columns(), ["x", "y"]);
    let result = classify(&matrix);
    assert_eq!(result.strong_positive.len(), 1);
    assert!(result.strong_negative.is_empty());
    assert!(result.weak.is_empty());
}

#[test]
fn correlate_needs_two_numeric_columns() {
    let df = frame(vec![
        Column::new("x".into(), vec![1.0, 2.0]),
        Column::new("name".into(), vec!["a", "b"]),
    ]);
    assert!(matches!(
        correlate(&df),
        Err(AnalysisError::InsufficientColumns {
            required: 2,
            found: 1
        })
    ));
}

#[test]
fn perfect_negative_and_uncorrelated_pairs() {
    let df = frame(vec![
        Column::new("up".into(), vec![1.0, 2.0, 3.0, 4.0]),
        Column::new("down".into(), vec![4.0, 3.0, 2.0, 1.0]),
        Column::new("flat".into(), vec![1.0, -1.0, -1.0, 1.0]),
    ]);
    let result = classify(&correlate(&df).unwrap());
    assert_eq!(result.strong_negative.len(), 1);
    assert_eq!(result.strong_negative[0].first, "up");
    assert_eq!(result.strong_negative[0].second, "down");
    assert_eq!(result.weak.len(), 2);
    assert!(result.strong_positive.is_empty());
}

#[test]
fn describe_skips_short_and_text_columns() {
    let df = frame(vec![
        Column::new("full".into(), vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]),
        Column::new("sparse".into(), vec![None, None, Some(3.0), None]),
        Column::new("label".into(), vec!["a", "b", "c", "d"]),
        Column::new("ints".into(), vec![5i64, 5, 5, 5]),
    ]);
    let stats = describe(&df).unwrap();
    let names: Vec<&str> = stats.iter().map(|s| s.column.as_str()).collect();
    assert_eq!(names, vec!["full", "ints"]);
    assert_eq!(stats[1].std, 0.0);
    assert_eq!(stats[1].outliers, 0);
}

#[test]
fn generated_normal_data_passes_normality_test() {
    let df = generate(&GenerateOptions {
        rows: 500,
        cols: 1,
        pattern: Pattern::Gaussian,
        noise: false,
        seed: Some(2024),
    })
    .unwrap();
    let stats = describe(&df).unwrap();
    assert_eq!(stats.len(), 1);
    assert!(stats[0].normality_p_value.is_some());
    assert!(stats[0].mean.abs() < 0.2);
    assert!((stats[0].std - 1.0).abs() < 0.15);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn correlation_is_symmetric_with_unit_diagonal(seed in any::<u64>(), cols in 2i64..6) {
        let df = generate(&GenerateOptions {
            rows: 40,
            cols,
            pattern: Pattern::Gaussian,
            noise: false,
            seed: Some(seed),
        })
        .unwrap();
        let matrix = correlate(&df).unwrap();
        for i in 0..matrix.len() {
            prop_assert_eq!(matrix.get(i, i), Some(1.0));
            for j in 0..matrix.len() {
                prop_assert_eq!(matrix.get(i, j), matrix.get(j, i));
                if let Some(r) = matrix.get(i, j) {
                    prop_assert!((-1.0..=1.0).contains(&r));
                }
            }
        }
        let classes = classify(&matrix);
        prop_assert!(classes.weak.len() <= 5);
    }
}

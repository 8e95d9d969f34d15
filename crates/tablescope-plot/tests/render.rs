use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use polars::prelude::*;
use tablescope_analysis::describe_column;
use tablescope_common::NumericColumn;
use tablescope_model::CorrelationMatrix;
use tablescope_plot::{
    EncodedImage, PlotError, PlotKind, render, render_distribution, render_heatmap,
};

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

fn png_bytes(image: &EncodedImage) -> Vec<u8> {
    let bytes = STANDARD.decode(image.base64()).unwrap();
    assert!(bytes.starts_with(PNG_SIGNATURE));
    bytes
}

fn mixed_table() -> DataFrame {
    df!(
        "x" => [1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        "y" => [2.0, 4.1, 5.9, 8.2, 9.9, 40.0],
        "label" => ["a", "b", "c", "d", "e", "f"],
    )
    .unwrap()
}

#[test]
fn histogram_per_numeric_column() {
    let plots = render(&mixed_table(), PlotKind::Hist).unwrap();
    let labels: Vec<_> = plots.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, ["x", "y"]);
    for plot in &plots {
        assert!(plot.image.data_uri().starts_with("data:image/png;base64,"));
        png_bytes(&plot.image);
        assert_eq!(plot.stats.rows[0], ["count", "6"]);
    }
}

#[test]
fn box_plot_is_a_single_image() {
    let plots = render(&mixed_table(), PlotKind::Box).unwrap();
    assert_eq!(plots.len(), 1);
    let stats = &plots[0].stats;
    insta::assert_snapshot!(stats.headers.join(" | "), @"Column | Min | Q1 | Median | Q3 | Max | IQR | Outliers");
    assert_eq!(stats.rows.len(), 2);
    // 40.0 sits above the upper fence of y.
    assert_eq!(stats.rows[1][7], "16.67%");
    png_bytes(&plots[0].image);
}

#[test]
fn box_plot_keeps_sparse_columns() {
    let df = df!(
        "x" => [Some(1.0), Some(2.0), Some(3.0), Some(4.0)],
        "lonely" => [None, Some(5.0), None, None],
    )
    .unwrap();
    let plots = render(&df, PlotKind::Box).unwrap();
    let rows = &plots[0].stats.rows;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], "x");
    assert_eq!(rows[1], ["lonely", "n/a", "n/a", "n/a", "n/a", "n/a", "n/a", "n/a"]);
    png_bytes(&plots[0].image);
}

#[test]
fn scatter_needs_two_numeric_columns() {
    let one = df!("x" => [1.0, 2.0, 3.0], "label" => ["a", "b", "c"]).unwrap();
    assert!(matches!(
        render(&one, PlotKind::Scatter),
        Err(PlotError::InsufficientColumns { required: 2, found: 1 })
    ));

    let plots = render(&mixed_table(), PlotKind::Scatter).unwrap();
    assert_eq!(plots.len(), 1);
    assert!(plots[0].stats.is_empty());
    png_bytes(&plots[0].image);
}

#[test]
fn scatter_annotation_is_drawn() {
    let plots = render(&mixed_table(), PlotKind::Scatter).unwrap();
    let png = png_bytes(&plots[0].image);
    let image = image::load_from_memory(&png).unwrap().to_rgb8();
    assert_eq!(image.dimensions(), (440, 440));
    // The coefficient label sits near the top-left of the upper-right cell;
    // only text is drawn in black there.
    let dark = (268..360)
        .flat_map(|x| (0..40).map(move |y| (x, y)))
        .filter(|&(x, y)| image.get_pixel(x, y).0.iter().all(|c| *c < 80))
        .count();
    assert!(dark > 0, "no text pixels in the annotation area");
}

#[test]
fn heatmap_and_distribution_images_are_png() {
    let matrix = CorrelationMatrix::from_fn(vec!["a".into(), "b".into(), "c".into()], |i, j| {
        if i == 2 || j == 2 {
            None
        } else if i == j {
            Some(1.0)
        } else {
            Some(0.35)
        }
    });
    png_bytes(&render_heatmap(&matrix).unwrap());

    let column = NumericColumn {
        name: "v".to_string(),
        values: [-1.2, -0.4, 0.0, 0.3, 0.5, 0.9, 1.4, -0.8, 0.1, 0.2]
            .into_iter()
            .map(Some)
            .collect(),
    };
    let stats = describe_column(&column).unwrap();
    assert!(stats.is_normal);
    png_bytes(&render_distribution(&column.present(), &stats).unwrap());
}

#[test]
fn text_only_table_has_nothing_to_plot() {
    let text = df!("label" => ["a", "b"]).unwrap();
    for kind in [PlotKind::Hist, PlotKind::Box] {
        assert!(matches!(render(&text, kind), Err(PlotError::NoNumericColumns)));
    }
    assert!(matches!(
        render(&text, PlotKind::Scatter),
        Err(PlotError::InsufficientColumns { found: 0, .. })
    ));
}

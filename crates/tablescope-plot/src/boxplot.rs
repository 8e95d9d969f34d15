//! Combined box-and-whisker plot.

use plotters::prelude::*;
use tablescope_analysis::describe_column;
use tablescope_common::NumericColumn;

use crate::canvas::{ACCENT_COLOR, BAR_COLOR, FONT, padded_range, render_encoded};
use crate::error::{Result, render_error};
use crate::types::{RenderedPlot, StatsTable};

const HEIGHT: u32 = 500;
const BOX_HALF_WIDTH: f64 = 0.3;
const NOT_AVAILABLE: &str = "n/a";

fn width_for(columns: usize) -> u32 {
    (160 + 90 * columns as u32).clamp(600, 1400)
}

fn fmt(value: f64) -> String {
    format!("{value:.4}")
}

/// One image with a box per numeric column, plus a table of quartiles.
///
/// Columns with fewer than two values keep their slot and table row, with
/// `n/a` in place of the statistics.
pub(crate) fn render_box(columns: &[NumericColumn]) -> Result<RenderedPlot> {
    let described: Vec<_> = columns
        .iter()
        .map(|column| (column.present(), describe_column(column)))
        .collect();
    let names: Vec<String> = columns.iter().map(|column| column.name.clone()).collect();
    let lo = described
        .iter()
        .filter_map(|(_, s)| s.as_ref())
        .map(|s| s.min)
        .fold(f64::INFINITY, f64::min);
    let hi = described
        .iter()
        .filter_map(|(_, s)| s.as_ref())
        .map(|s| s.max)
        .fold(f64::NEG_INFINITY, f64::max);
    let k = columns.len().max(1);

    let image = render_encoded(width_for(k), HEIGHT, |area| {
        let mut chart = ChartBuilder::on(area)
            .caption("Box plot", (FONT, 20))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(55)
            .build_cartesian_2d(-0.5..(k as f64 - 0.5), padded_range(lo, hi))
            .map_err(render_error)?;
        let label = |x: &f64| {
            let index = x.round();
            if (x - index).abs() > 1e-6 || index < 0.0 {
                return String::new();
            }
            names.get(index as usize).cloned().unwrap_or_default()
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(k + 1)
            .x_label_formatter(&label)
            .y_desc("Value")
            .draw()
            .map_err(render_error)?;

        for (i, (values, stats)) in described.iter().enumerate() {
            let Some(stats) = stats else {
                continue;
            };
            let x = i as f64;
            let q = stats.quartiles;
            let low_whisker = values
                .iter()
                .copied()
                .filter(|v| *v >= q.lower_fence())
                .fold(q.q1, f64::min);
            let high_whisker = values
                .iter()
                .copied()
                .filter(|v| *v <= q.upper_fence())
                .fold(q.q3, f64::max);
            let (left, right) = (x - BOX_HALF_WIDTH, x + BOX_HALF_WIDTH);

            chart
                .draw_series([
                    Rectangle::new([(left, q.q1), (right, q.q3)], BAR_COLOR.mix(0.4).filled()),
                    Rectangle::new([(left, q.q1), (right, q.q3)], BLACK.stroke_width(1)),
                ])
                .map_err(render_error)?;
            chart
                .draw_series([
                    PathElement::new(vec![(left, q.median), (right, q.median)], ACCENT_COLOR.stroke_width(2)),
                    PathElement::new(vec![(x, q.q3), (x, high_whisker)], BLACK.stroke_width(1)),
                    PathElement::new(vec![(x, q.q1), (x, low_whisker)], BLACK.stroke_width(1)),
                    PathElement::new(
                        vec![(x - 0.15, high_whisker), (x + 0.15, high_whisker)],
                        BLACK.stroke_width(1),
                    ),
                    PathElement::new(
                        vec![(x - 0.15, low_whisker), (x + 0.15, low_whisker)],
                        BLACK.stroke_width(1),
                    ),
                ])
                .map_err(render_error)?;
            chart
                .draw_series(
                    values
                        .iter()
                        .filter(|v| q.is_outlier(**v))
                        .map(|v| Circle::new((x, *v), 3, ACCENT_COLOR.filled())),
                )
                .map_err(render_error)?;
        }
        Ok(())
    })?;

    let rows = columns
        .iter()
        .zip(&described)
        .map(|(column, (_, stats))| match stats {
            Some(s) => vec![
                column.name.clone(),
                fmt(s.min),
                fmt(s.quartiles.q1),
                fmt(s.quartiles.median),
                fmt(s.quartiles.q3),
                fmt(s.max),
                fmt(s.quartiles.iqr()),
                format!("{:.2}%", s.outlier_percent),
            ],
            None => std::iter::once(column.name.clone())
                .chain(std::iter::repeat_n(NOT_AVAILABLE.to_string(), 7))
                .collect(),
        })
        .collect();
    let headers = ["Column", "Min", "Q1", "Median", "Q3", "Max", "IQR", "Outliers"]
        .into_iter()
        .map(String::from)
        .collect();

    Ok(RenderedPlot {
        label: "Box plot".to_string(),
        image,
        stats: StatsTable { headers, rows },
    })
}

//! Density histograms, with an optional fitted normal curve.

use plotters::prelude::*;
use statrs::distribution::{Continuous, Normal};
use tablescope_analysis::{describe_column, histogram};
use tablescope_common::NumericColumn;
use tablescope_model::ColumnStatistics;

use crate::canvas::{ACCENT_COLOR, Area, BAR_COLOR, FONT, padded_range, render_encoded};
use crate::error::{Result, render_error};
use crate::types::{EncodedImage, RenderedPlot, StatsTable};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 500;
const CURVE_POINTS: usize = 200;

/// Normal distribution drawn over a histogram.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NormalOverlay {
    pub mean: f64,
    pub std: f64,
}

/// Draws a density histogram of `values` into `area`.
pub(crate) fn draw_histogram(
    area: &Area<'_>,
    caption: Option<&str>,
    x_desc: &str,
    values: &[f64],
    overlay: Option<NormalOverlay>,
) -> Result<()> {
    let bins = histogram(values);
    let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
        return Ok(());
    };
    let normal = overlay.and_then(|o| Normal::new(o.mean, o.std).ok().map(|n| (o, n)));
    let curve_peak = normal.map_or(0.0, |(o, n)| n.pdf(o.mean));
    let bar_peak = bins.iter().map(|b| b.density).fold(0.0, f64::max);
    let y_max = bar_peak.max(curve_peak) * 1.1;
    let x_range = padded_range(first.start, last.end);

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(50);
    if let Some(caption) = caption {
        builder.caption(caption, (FONT, 20));
    }
    let mut chart = builder
        .build_cartesian_2d(x_range.clone(), 0.0..y_max.max(f64::EPSILON))
        .map_err(render_error)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(x_desc)
        .y_desc("Density")
        .draw()
        .map_err(render_error)?;

    chart
        .draw_series(bins.iter().map(|bin| {
            Rectangle::new(
                [(bin.start, 0.0), (bin.end, bin.density)],
                BAR_COLOR.mix(0.7).filled(),
            )
        }))
        .map_err(render_error)?;

    if let Some((overlay, normal)) = normal {
        let step = (x_range.end - x_range.start) / CURVE_POINTS as f64;
        chart
            .draw_series(LineSeries::new(
                (0..=CURVE_POINTS).map(|i| {
                    let x = x_range.start + step * i as f64;
                    (x, normal.pdf(x))
                }),
                ACCENT_COLOR.stroke_width(2),
            ))
            .map_err(render_error)?;
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(overlay.mean, 0.0), (overlay.mean, y_max)],
                BLACK.stroke_width(1),
            )))
            .map_err(render_error)?;
    }
    Ok(())
}

/// Histogram image with a normal overlay when the column looks normal.
pub fn render_distribution(values: &[f64], stats: &ColumnStatistics) -> Result<EncodedImage> {
    let overlay = stats.is_normal.then_some(NormalOverlay {
        mean: stats.mean,
        std: stats.std,
    });
    let caption = format!("Distribution of {}", stats.column);
    render_encoded(WIDTH, HEIGHT, |area| {
        draw_histogram(area, Some(&caption), &stats.column, values, overlay)
    })
}

fn format_stat(value: f64) -> String {
    format!("{value:.4}")
}

fn histogram_stats(stats: Option<&ColumnStatistics>, count: usize) -> StatsTable {
    let headers = vec!["Statistic".to_string(), "Value".to_string()];
    let Some(stats) = stats else {
        return StatsTable {
            headers,
            rows: vec![vec!["count".to_string(), count.to_string()]],
        };
    };
    let rows = [
        ("count", stats.count.to_string()),
        ("mean", format_stat(stats.mean)),
        ("median", format_stat(stats.median)),
        ("std", format_stat(stats.std)),
        ("min", format_stat(stats.min)),
        ("max", format_stat(stats.max)),
    ]
    .into_iter()
    .map(|(name, value)| vec![name.to_string(), value])
    .collect();
    StatsTable { headers, rows }
}

/// One histogram per numeric column.
pub(crate) fn render_histograms(columns: &[NumericColumn]) -> Result<Vec<RenderedPlot>> {
    columns
        .iter()
        .map(|column| {
            let values = column.present();
            let stats = describe_column(column);
            let caption = format!("Histogram of {}", column.name);
            let image = render_encoded(WIDTH, HEIGHT, |area| {
                draw_histogram(area, Some(&caption), &column.name, &values, None)
            })?;
            Ok(RenderedPlot {
                label: column.name.clone(),
                image,
                stats: histogram_stats(stats.as_ref(), values.len()),
            })
        })
        .collect()
}

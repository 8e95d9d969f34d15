//! Pairwise scatter matrix.

use plotters::prelude::*;
use tablescope_analysis::pearson;
use tablescope_common::NumericColumn;

use crate::canvas::{Area, BAR_COLOR, FONT, padded_range, render_encoded};
use crate::error::{PlotError, Result, render_error};
use crate::hist::draw_histogram;
use crate::types::{RenderedPlot, StatsTable};

const CELL_SIZE: u32 = 220;

fn range_of(values: &[f64]) -> std::ops::Range<f64> {
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    padded_range(lo, hi)
}

fn draw_pair(cell: &Area<'_>, x: &NumericColumn, y: &NumericColumn) -> Result<()> {
    let points: Vec<(f64, f64)> = x
        .values
        .iter()
        .zip(&y.values)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();
    let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.1).collect();

    let mut chart = ChartBuilder::on(cell)
        .margin(5)
        .x_label_area_size(25)
        .y_label_area_size(40)
        .build_cartesian_2d(range_of(&xs), range_of(&ys))
        .map_err(render_error)?;
    chart
        .configure_mesh()
        .x_labels(4)
        .y_labels(4)
        .disable_mesh()
        .draw()
        .map_err(render_error)?;
    chart
        .draw_series(
            points
                .iter()
                .map(|p| Circle::new(*p, 2, BAR_COLOR.mix(0.6).filled())),
        )
        .map_err(render_error)?;

    let annotation = match pearson(&x.values, &y.values) {
        Some(r) => format!("ρ = {r:.2}"),
        None => "ρ = n/a".to_string(),
    };
    let style = TextStyle::from((FONT, 14).into_font());
    cell.draw_text(&annotation, &style, (50, 8))
        .map_err(render_error)?;
    Ok(())
}

/// A `k x k` grid: histograms on the diagonal, scatter plots elsewhere.
pub(crate) fn render_scatter_matrix(columns: &[NumericColumn]) -> Result<RenderedPlot> {
    let k = columns.len();
    if k < 2 {
        return Err(PlotError::InsufficientColumns {
            required: 2,
            found: k,
        });
    }
    let side = CELL_SIZE * k as u32;
    let image = render_encoded(side, side, |area| {
        let cells = area.split_evenly((k, k));
        for (index, cell) in cells.iter().enumerate() {
            let (row, col) = (index / k, index % k);
            if row == col {
                let column = &columns[row];
                draw_histogram(cell, None, &column.name, &column.present(), None)?;
            } else {
                draw_pair(cell, &columns[col], &columns[row])?;
            }
        }
        Ok(())
    })?;

    Ok(RenderedPlot {
        label: "Scatter matrix".to_string(),
        image,
        stats: StatsTable::default(),
    })
}
